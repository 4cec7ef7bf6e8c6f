//! Domain types for mutual fund portfolio analysis.
//!
//! - [`Date`]: Calendar date for transactions and valuation
//! - [`Transaction`]: Immutable BUY/SELL/DIVIDEND record
//! - [`Fund`]: Static fund reference data
//! - [`FundCategory`]: Ingestion-time fund category
//! - [`AssetClass`]: Analysis bucket (GOLD and SILVER combined)
//! - [`AgeGroup`] / [`RiskProfile`]: Keys of the target allocation table

mod date;
mod fund;
mod profile;
mod transaction;

pub use date::{Date, DAYS_PER_YEAR};
pub use fund::{AssetClass, Fund, FundBook, FundCategory};
pub use profile::{AgeGroup, RiskProfile};
pub use transaction::{Transaction, TransactionType};
