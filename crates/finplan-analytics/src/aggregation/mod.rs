//! Transaction aggregation.
//!
//! Groups transactions by fund, values each fund and solves its XIRR. Pure:
//! the output depends only on the inputs and is ordered by fund code.

mod parallel;

pub use parallel::maybe_parallel_map;

use std::collections::{BTreeMap, BTreeSet};

use finplan_core::{Date, Fund, FundBook, FundCategory, Transaction, TransactionType};
use log::debug;
use rust_decimal::Decimal;

use crate::config::AnalysisConfig;
use crate::returns::build_fund_cash_flows;
use crate::types::amount::price_scaled;
use crate::types::FundPosition;

/// Builds one [`FundPosition`] per fund whose category satisfies `include`.
///
/// - Transactions are grouped by `fund_code`; funds without matching
///   transactions are absent from the result
/// - Transactions for codes missing from `funds` are skipped
/// - `invested` sums BUY quantities only
/// - `current_value = invested × unit price / 100`, where the unit price
///   falls back to `config.fallback_unit_price` when missing or not positive
/// - Amounts saturate instead of overflowing
///
/// # Example
///
/// ```rust
/// use finplan_analytics::aggregation::aggregate_positions;
/// use finplan_analytics::config::AnalysisConfig;
/// use finplan_core::{Date, Fund, FundBook, FundCategory, Transaction};
/// use rust_decimal_macros::dec;
///
/// let funds = FundBook::new()
///     .with_fund(Fund::new("EQ", "Index Fund", FundCategory::Equity).with_current_price(dec!(150)));
/// let as_of = Date::from_ymd(2025, 1, 1).unwrap();
/// let txs = vec![Transaction::buy(as_of - 365, "EQ", "Index Fund", dec!(1000))];
///
/// let positions = aggregate_positions(
///     &txs,
///     &funds,
///     |c| c == FundCategory::Equity,
///     &AnalysisConfig::default(),
///     as_of,
/// );
/// assert_eq!(positions.len(), 1);
/// assert_eq!(positions[0].current_value, dec!(1500));
/// ```
pub fn aggregate_positions<P>(
    transactions: &[Transaction],
    funds: &FundBook,
    include: P,
    config: &AnalysisConfig,
    as_of: Date,
) -> Vec<FundPosition>
where
    P: Fn(FundCategory) -> bool,
{
    let mut grouped: BTreeMap<&str, (&Fund, Vec<&Transaction>)> = BTreeMap::new();

    for tx in transactions {
        let Some(fund) = funds.get(&tx.fund_code) else {
            debug!("skipping transaction for unknown fund {}", tx.fund_code);
            continue;
        };
        if !include(fund.category) {
            continue;
        }
        grouped
            .entry(tx.fund_code.as_str())
            .or_insert_with(|| (fund, Vec::new()))
            .1
            .push(tx);
    }

    let groups: Vec<(&Fund, Vec<&Transaction>)> = grouped.into_values().collect();
    maybe_parallel_map(&groups, config, |(fund, txs)| {
        value_position(fund, txs, config, as_of)
    })
}

/// Fund codes referenced by transactions but missing from the fund book.
#[must_use]
pub fn unknown_fund_codes(transactions: &[Transaction], funds: &FundBook) -> BTreeSet<String> {
    transactions
        .iter()
        .filter(|tx| !funds.contains(&tx.fund_code))
        .map(|tx| tx.fund_code.clone())
        .collect()
}

fn value_position(
    fund: &Fund,
    transactions: &[&Transaction],
    config: &AnalysisConfig,
    as_of: Date,
) -> FundPosition {
    let mut ordered: Vec<Transaction> = transactions.iter().map(|tx| (*tx).clone()).collect();
    ordered.sort_by_key(|tx| tx.date);

    let mut invested = Decimal::ZERO;
    let mut units_held = Decimal::ZERO;
    for tx in &ordered {
        match tx.transaction_type {
            TransactionType::Buy => {
                invested = invested.saturating_add(tx.quantity.abs());
                units_held = units_held.saturating_add(tx.quantity.abs());
            }
            TransactionType::Sell => units_held = units_held.saturating_sub(tx.quantity.abs()),
            TransactionType::Dividend => {}
        }
    }

    let unit_price = fund.price_or(config.fallback_unit_price);
    let current_value = price_scaled(invested, unit_price);
    let flows = build_fund_cash_flows(&ordered, fund.current_price, config.fallback_unit_price, as_of);

    FundPosition {
        fund_code: fund.code.clone(),
        fund_name: fund.name.clone(),
        category: fund.category,
        transactions: ordered,
        invested,
        units_held,
        current_value,
        unit_price,
        xirr: config.xirr.xirr(&flows),
        benchmark_xirr: config.benchmarks.for_category(fund.category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn as_of() -> Date {
        Date::from_ymd(2025, 6, 30).unwrap()
    }

    fn book() -> FundBook {
        FundBook::new()
            .with_fund(
                Fund::new("EQ1", "UTI Nifty Index Fund", FundCategory::Equity)
                    .with_current_price(dec!(110)),
            )
            .with_fund(Fund::new("EQ2", "SBI Sensex Index Fund", FundCategory::Equity))
            .with_fund(Fund::new("DT1", "HDFC Short Term Debt Fund", FundCategory::Debt))
    }

    #[test]
    fn test_groups_by_fund_and_filters_category() {
        let txs = vec![
            Transaction::buy(as_of() - 365, "EQ2", "SBI Sensex Index Fund", dec!(500)),
            Transaction::buy(as_of() - 365, "EQ1", "UTI Nifty Index Fund", dec!(1000)),
            Transaction::buy(as_of() - 200, "DT1", "HDFC Short Term Debt Fund", dec!(700)),
            Transaction::buy(as_of() - 100, "EQ1", "UTI Nifty Index Fund", dec!(200)),
        ];

        let positions = aggregate_positions(
            &txs,
            &book(),
            |c| c == FundCategory::Equity,
            &AnalysisConfig::default(),
            as_of(),
        );

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].fund_code, "EQ1");
        assert_eq!(positions[0].transactions.len(), 2);
        assert_eq!(positions[0].invested, dec!(1200));
        assert_eq!(positions[0].current_value, dec!(1320));
        assert_eq!(positions[1].fund_code, "EQ2");
        // No price recorded: fallback of 100 leaves value equal to invested.
        assert_eq!(positions[1].current_value, dec!(500));
        assert_eq!(positions[1].unit_price, dec!(100));
    }

    #[test]
    fn test_invested_excludes_sell_and_dividend() {
        let txs = vec![
            Transaction::buy(as_of() - 300, "EQ1", "UTI Nifty Index Fund", dec!(1000)),
            Transaction::sell(as_of() - 100, "EQ1", "UTI Nifty Index Fund", dec!(400)),
            Transaction::dividend(as_of() - 50, "EQ1", "UTI Nifty Index Fund", dec!(30)),
        ];

        let positions =
            aggregate_positions(&txs, &book(), |_| true, &AnalysisConfig::default(), as_of());

        assert_eq!(positions[0].invested, dec!(1000));
        assert_eq!(positions[0].units_held, dec!(600));
        assert_eq!(positions[0].current_value, dec!(1100));
    }

    #[test]
    fn test_unknown_fund_skipped() {
        let txs = vec![
            Transaction::buy(as_of() - 365, "GHOST", "Ghost Fund", dec!(1000)),
            Transaction::buy(as_of() - 365, "DT1", "HDFC Short Term Debt Fund", dec!(100)),
        ];

        let positions =
            aggregate_positions(&txs, &book(), |_| true, &AnalysisConfig::default(), as_of());

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].fund_code, "DT1");

        let unknown = unknown_fund_codes(&txs, &book());
        assert_eq!(unknown.into_iter().collect::<Vec<_>>(), vec!["GHOST"]);
    }

    #[test]
    fn test_position_xirr() {
        let txs = vec![Transaction::buy(
            as_of() - 365,
            "EQ1",
            "UTI Nifty Index Fund",
            dec!(1000),
        )];

        let positions =
            aggregate_positions(&txs, &book(), |_| true, &AnalysisConfig::default(), as_of());

        // 1000 valued at 110/100 one year later.
        assert_relative_eq!(positions[0].xirr, 10.0, epsilon = 1e-8);
        assert_relative_eq!(positions[0].benchmark_xirr, 12.0);
        assert!(positions[0].is_underperforming());
    }

    #[test]
    fn test_empty_input() {
        let positions =
            aggregate_positions(&[], &book(), |_| true, &AnalysisConfig::default(), as_of());
        assert!(positions.is_empty());
    }
}
