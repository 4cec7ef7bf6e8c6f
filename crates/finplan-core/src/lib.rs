//! # Finplan Core
//!
//! Domain vocabulary shared by every Finplan crate:
//!
//! - **Transactions**: BUY, SELL and DIVIDEND records with a fund code and quantity
//! - **Funds**: Reference data with a category fixed at ingestion
//! - **Profiles**: Age bands and risk profiles that key the target allocation table
//!
//! ## Example
//!
//! ```rust
//! use finplan_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let funds = FundBook::new()
//!     .with_fund(Fund::new("UTI_NIFTY", "UTI Nifty Index Fund", FundCategory::Equity));
//!
//! let tx = Transaction::buy(
//!     Date::from_ymd(2024, 1, 15).unwrap(),
//!     "UTI_NIFTY",
//!     "UTI Nifty Index Fund",
//!     dec!(1000),
//! );
//!
//! assert_eq!(funds.category_of(&tx.fund_code), Some(FundCategory::Equity));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        AgeGroup, AssetClass, Date, Fund, FundBook, FundCategory, RiskProfile, Transaction,
        TransactionType,
    };
}

pub use error::{CoreError, CoreResult};
pub use types::{
    AgeGroup, AssetClass, Date, Fund, FundBook, FundCategory, RiskProfile, Transaction,
    TransactionType,
};
