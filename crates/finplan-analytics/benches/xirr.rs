//! Benchmarks for XIRR solving and portfolio analysis.
//!
//! Run with: cargo bench -p finplan-analytics

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use finplan_analytics::prelude::*;
use finplan_core::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn as_of() -> Date {
    Date::from_ymd(2025, 1, 1).unwrap()
}

/// Monthly purchases followed by a terminal value about 30% above cost.
fn sip_flows(months: i64) -> Vec<CashFlow> {
    let start = as_of() - months * 30;
    let mut flows: Vec<CashFlow> = (0..months)
        .map(|m| CashFlow::new(start + m * 30, -1000.0))
        .collect();
    flows.push(CashFlow::new(as_of(), months as f64 * 1300.0));
    flows
}

fn create_portfolio(n_funds: usize) -> (Vec<Transaction>, FundBook) {
    let categories = [
        FundCategory::Equity,
        FundCategory::Debt,
        FundCategory::Hybrid,
        FundCategory::Gold,
        FundCategory::Silver,
    ];
    let mut funds = FundBook::new();
    let mut txs = Vec::new();

    for i in 0..n_funds {
        let code = format!("FUND_{i:04}");
        let price = Decimal::from(95 + (i % 40) as i64);
        funds.insert(
            Fund::new(code.clone(), code.clone(), categories[i % categories.len()])
                .with_current_price(price),
        );
        for m in 0..24 {
            txs.push(Transaction::buy(
                as_of() - (730 - m * 30),
                code.clone(),
                code.clone(),
                Decimal::from(1000 + i as i64),
            ));
        }
    }
    (txs, funds)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_xirr(c: &mut Criterion) {
    let solver = XirrSolver::default();
    let mut group = c.benchmark_group("xirr");

    for months in [12, 60, 240].iter() {
        let flows = sip_flows(*months);
        group.throughput(Throughput::Elements(flows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(months), &flows, |b, flows| {
            b.iter(|| solver.xirr(black_box(flows)))
        });
    }
    group.finish();
}

fn bench_portfolio(c: &mut Criterion) {
    let mut group = c.benchmark_group("portfolio_analysis");
    group.sample_size(30);

    for (name, config) in [
        ("sequential", AnalysisConfig::sequential()),
        ("parallel", AnalysisConfig::default().with_threshold(16)),
    ] {
        for size in [10, 100, 500].iter() {
            let (txs, funds) = create_portfolio(*size);
            group.bench_with_input(BenchmarkId::new(name, size), &(txs, funds), |b, (txs, funds)| {
                b.iter(|| {
                    PortfolioCoordinator::new(&config)
                        .as_of(as_of())
                        .analyze(
                            black_box(txs),
                            black_box(funds),
                            AgeGroup::From30To40,
                            RiskProfile::Moderate,
                        )
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_xirr, bench_portfolio);
criterion_main!(benches);
