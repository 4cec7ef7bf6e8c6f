//! Capital-weighted blending of rates.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Capital-weighted average rate: `Σ(rate_i × capital_i) / Σ capital_i`.
///
/// Entries with zero capital contribute no weight. Returns `0.0` when the
/// total capital is not positive.
///
/// # Example
///
/// ```rust
/// use finplan_analytics::returns::capital_weighted_rate;
/// use rust_decimal_macros::dec;
///
/// // 100 at 10% and 300 at 20% blend to 17.5%, not 15%.
/// let blended = capital_weighted_rate([(10.0, dec!(100)), (20.0, dec!(300))]);
/// assert!((blended - 17.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn capital_weighted_rate<I>(entries: I) -> f64
where
    I: IntoIterator<Item = (f64, Decimal)>,
{
    let (weighted_sum, total_weight) =
        entries
            .into_iter()
            .fold((0.0, 0.0), |(sum, weight), (rate, capital)| {
                let capital = capital.to_f64().unwrap_or(0.0);
                if capital > 0.0 {
                    (sum + rate * capital, weight + capital)
                } else {
                    (sum, weight)
                }
            });

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}
