//! Overflow-safe arithmetic on money amounts.
//!
//! `Decimal` operators panic on overflow. Amounts come from user data, so
//! sums and products saturate at `Decimal::MAX` / `Decimal::MIN` instead.

use log::warn;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Saturating sum of amounts.
pub(crate) fn saturating_sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `amount × price / 100`, saturating when the product overflows.
pub(crate) fn price_scaled(amount: Decimal, price: Decimal) -> Decimal {
    match amount.checked_mul(price) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        None => {
            warn!("valuation of {amount} at price {price} overflows, saturating");
            (amount / Decimal::ONE_HUNDRED).saturating_mul(price)
        }
    }
}

/// `part / total × 100` as `f64`; `0.0` when `total` is not positive.
///
/// Falls back to floating point when the decimal quotient overflows.
pub(crate) fn percent_of(part: Decimal, total: Decimal) -> f64 {
    if total <= Decimal::ZERO {
        return 0.0;
    }

    part.checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
        .unwrap_or_else(|| {
            let part = part.to_f64().unwrap_or(0.0);
            let total = total.to_f64().unwrap_or(0.0);
            if total > 0.0 {
                part / total * 100.0
            } else {
                0.0
            }
        })
}
