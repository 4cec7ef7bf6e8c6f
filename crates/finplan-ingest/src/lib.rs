//! # Finplan Ingest
//!
//! Loads mutual fund transaction histories from CSV into the core domain
//! types.
//!
//! - [`load_portfolio_csv`] / [`read_portfolio_csv`]: Parse transactions and
//!   build the fund book
//! - [`categorize_fund`]: Name-based category assignment
//! - [`PriceSource`]: Current unit prices, with [`StaticPriceTable`] as the
//!   in-memory implementation

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod categorize;
pub mod error;
mod loader;
mod prices;

pub use categorize::categorize_fund;
pub use error::{IngestError, IngestResult};
pub use loader::{load_portfolio_csv, read_portfolio_csv, Portfolio};
pub use prices::{PriceSource, StaticPriceTable};
