//! Transaction records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Date;
use crate::error::CoreError;

/// Kind of fund movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Purchase of units; capital leaves the investor.
    Buy,
    /// Redemption of units; capital returns to the investor.
    Sell,
    /// Dividend payout. Recorded but not treated as a cash flow.
    Dividend,
}

impl TransactionType {
    /// Returns the upper-case label used in source data.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Dividend => "DIVIDEND",
        }
    }

    /// Returns true for purchases.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }

    /// Returns true for redemptions.
    #[must_use]
    pub fn is_sell(&self) -> bool {
        matches!(self, Self::Sell)
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TransactionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            "DIVIDEND" => Ok(Self::Dividend),
            _ => Err(CoreError::UnknownTransactionType {
                label: s.to_string(),
            }),
        }
    }
}

/// One immutable fund movement.
///
/// `quantity` carries the source `transaction_count` column. Depending on the
/// caller it is read as units or as a currency amount; analyzers only ever use
/// its magnitude together with the transaction type.
///
/// # Example
///
/// ```rust
/// use finplan_core::types::{Date, Transaction, TransactionType};
/// use rust_decimal_macros::dec;
///
/// let date = Date::from_ymd(2024, 1, 15).unwrap();
/// let tx = Transaction::buy(date, "UTI_NIFTY", "UTI Nifty Index Fund", dec!(1000));
/// assert_eq!(tx.transaction_type, TransactionType::Buy);
/// assert_eq!(tx.signed_amount(), dec!(-1000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Trade date.
    pub date: Date,
    /// Code of the fund this transaction belongs to.
    pub fund_code: String,
    /// Fund display name as recorded on the transaction.
    pub fund_name: String,
    /// Kind of movement.
    pub transaction_type: TransactionType,
    /// Units or amount (`transaction_count` in source data).
    pub quantity: Decimal,
}

impl Transaction {
    /// Creates a new transaction.
    #[must_use]
    pub fn new(
        date: Date,
        fund_code: impl Into<String>,
        fund_name: impl Into<String>,
        transaction_type: TransactionType,
        quantity: Decimal,
    ) -> Self {
        Self {
            date,
            fund_code: fund_code.into(),
            fund_name: fund_name.into(),
            transaction_type,
            quantity,
        }
    }

    /// Creates a BUY transaction.
    #[must_use]
    pub fn buy(
        date: Date,
        fund_code: impl Into<String>,
        fund_name: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self::new(date, fund_code, fund_name, TransactionType::Buy, quantity)
    }

    /// Creates a SELL transaction.
    #[must_use]
    pub fn sell(
        date: Date,
        fund_code: impl Into<String>,
        fund_name: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self::new(date, fund_code, fund_name, TransactionType::Sell, quantity)
    }

    /// Creates a DIVIDEND transaction.
    #[must_use]
    pub fn dividend(
        date: Date,
        fund_code: impl Into<String>,
        fund_name: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self::new(date, fund_code, fund_name, TransactionType::Dividend, quantity)
    }

    /// Investor-side cash flow: BUY is negative, SELL positive, DIVIDEND zero.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Buy => -self.quantity.abs(),
            TransactionType::Sell => self.quantity.abs(),
            TransactionType::Dividend => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> Date {
        Date::from_ymd(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("BUY".parse::<TransactionType>().unwrap(), TransactionType::Buy);
        assert_eq!("sell".parse::<TransactionType>().unwrap(), TransactionType::Sell);
        assert_eq!(
            " Dividend ".parse::<TransactionType>().unwrap(),
            TransactionType::Dividend
        );
        assert!(matches!(
            "SWITCH".parse::<TransactionType>(),
            Err(CoreError::UnknownTransactionType { .. })
        ));
    }

    #[test]
    fn test_signed_amount() {
        let buy = Transaction::buy(date(), "F", "Fund", dec!(500));
        let sell = Transaction::sell(date(), "F", "Fund", dec!(200));
        let div = Transaction::dividend(date(), "F", "Fund", dec!(15));
        assert_eq!(buy.signed_amount(), dec!(-500));
        assert_eq!(sell.signed_amount(), dec!(200));
        assert_eq!(div.signed_amount(), Decimal::ZERO);

        // Sign comes from the type, not from the recorded quantity.
        let negative_sell = Transaction::sell(date(), "F", "Fund", dec!(-200));
        assert_eq!(negative_sell.signed_amount(), dec!(200));
    }

    #[test]
    fn test_serde_labels() {
        let tx = Transaction::buy(date(), "F", "Fund", dec!(1));
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"BUY\""));
        assert!(json.contains("\"2024-03-01\""));
    }
}
