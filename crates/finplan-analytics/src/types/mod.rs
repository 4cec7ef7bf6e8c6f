//! Analysis value types.
//!
//! - [`AllocationSnapshot`]: Four-way percentage split across asset classes
//! - [`FundPosition`]: One fund's aggregated history and XIRR
//! - [`CategoryResult`]: Output of a category analyzer
//! - [`MetalSplit`]: Gold/silver split within precious metals

pub(crate) mod amount;
mod position;
mod result;
mod snapshot;

pub use position::FundPosition;
pub use result::{CategoryResult, MetalSplit};
pub use snapshot::AllocationSnapshot;
