//! # Finplan Math
//!
//! Numerical routines for the Finplan portfolio analysis engine.
//!
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, secant, Brent, hybrid)
//!   with iteration caps and optional open-interval domains, suited to solving
//!   for discount rates that must stay above -100%.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        brent, find_bracket, hybrid, hybrid_numerical, newton_raphson, newton_raphson_numerical,
        secant, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
