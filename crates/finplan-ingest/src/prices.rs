//! Current unit prices for funds.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Supplies the current unit price of a fund.
pub trait PriceSource {
    /// Price for `fund_code`, or `None` if unknown.
    fn price(&self, fund_code: &str) -> Option<Decimal>;
}

/// In-memory price table.
///
/// # Example
///
/// ```rust
/// use finplan_ingest::{PriceSource, StaticPriceTable};
/// use rust_decimal_macros::dec;
///
/// let prices = StaticPriceTable::demo();
/// assert_eq!(prices.price("UTI_NIFTY"), Some(dec!(150.25)));
/// assert_eq!(prices.price("UNLISTED"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPriceTable {
    prices: BTreeMap<String, Decimal>,
}

impl StaticPriceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo prices for the sample portfolio's funds.
    #[must_use]
    pub fn demo() -> Self {
        Self::new()
            .with_price("UTI_NIFTY", dec!(150.25))
            .with_price("SBI_SENSEX", dec!(45.80))
            .with_price("HDFC_DEBT", dec!(25.90))
            .with_price("ICICI_HYBRID", dec!(35.60))
            .with_price("NIPPON_GOLD", dec!(12.45))
            .with_price("KOTAK_SILVER", dec!(8.90))
    }

    /// Adds or replaces a price.
    #[must_use]
    pub fn with_price(mut self, fund_code: impl Into<String>, price: Decimal) -> Self {
        self.prices.insert(fund_code.into(), price);
        self
    }

    /// Number of priced funds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no fund is priced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceSource for StaticPriceTable {
    fn price(&self, fund_code: &str) -> Option<Decimal> {
        self.prices.get(fund_code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_table() {
        let prices = StaticPriceTable::demo();
        assert_eq!(prices.len(), 6);
        assert_eq!(prices.price("KOTAK_SILVER"), Some(dec!(8.90)));
        assert_eq!(prices.price("kotak_silver"), None);
    }

    #[test]
    fn test_override() {
        let prices = StaticPriceTable::demo().with_price("UTI_NIFTY", dec!(160));
        assert_eq!(prices.price("UTI_NIFTY"), Some(dec!(160)));
        assert!(StaticPriceTable::new().is_empty());
    }
}
