//! Return calculations.
//!
//! - [`XirrSolver`] / [`xirr`]: Annualized rate over dated cash flows
//! - [`XirrMethod`]: Root-finding strategy behind the solver
//! - [`build_fund_cash_flows`]: Cash flows for one fund's transaction history
//! - [`capital_weighted_rate`]: Blend per-fund rates by invested capital

mod weighted;
mod xirr;

pub use weighted::capital_weighted_rate;
pub use xirr::{
    build_fund_cash_flows, npv, try_xirr, xirr, CashFlow, XirrMethod, XirrSolver, SECANT_STEP,
};
