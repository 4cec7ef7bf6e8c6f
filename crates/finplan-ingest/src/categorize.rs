//! Fund categorization from display names.

use finplan_core::FundCategory;

const GOLD_KEYWORDS: &[&str] = &["gold", "precious", "metal"];
const DEBT_KEYWORDS: &[&str] = &["debt", "bond", "liquid", "money market", "gilt"];
const HYBRID_KEYWORDS: &[&str] = &["hybrid", "balanced"];

/// Assigns a category from keywords in a fund's name.
///
/// Checked in order: gold, silver, debt, hybrid. Anything else is equity.
/// Matching is case-insensitive.
///
/// ```rust
/// use finplan_core::FundCategory;
/// use finplan_ingest::categorize_fund;
///
/// assert_eq!(categorize_fund("HDFC Short Term Debt Fund"), FundCategory::Debt);
/// assert_eq!(categorize_fund("UTI Nifty Index Fund"), FundCategory::Equity);
/// ```
#[must_use]
pub fn categorize_fund(name: &str) -> FundCategory {
    let name = name.to_lowercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));

    if has_any(GOLD_KEYWORDS) {
        FundCategory::Gold
    } else if name.contains("silver") {
        FundCategory::Silver
    } else if has_any(DEBT_KEYWORDS) {
        FundCategory::Debt
    } else if has_any(HYBRID_KEYWORDS) {
        FundCategory::Hybrid
    } else {
        FundCategory::Equity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_funds() {
        assert_eq!(categorize_fund("SBI Sensex Index Fund"), FundCategory::Equity);
        assert_eq!(categorize_fund("ICICI Prudential Liquid Fund"), FundCategory::Debt);
        assert_eq!(categorize_fund("SBI Magnum Gilt Fund"), FundCategory::Debt);
        assert_eq!(
            categorize_fund("HDFC Balanced Advantage Fund"),
            FundCategory::Hybrid
        );
        assert_eq!(
            categorize_fund("Nippon India Gold Savings Fund"),
            FundCategory::Gold
        );
        assert_eq!(categorize_fund("Kotak Silver ETF Fund"), FundCategory::Silver);
    }

    #[test]
    fn test_precedence() {
        // Gold keywords win over everything else.
        assert_eq!(categorize_fund("Precious Metals Silver Fund"), FundCategory::Gold);
        assert_eq!(categorize_fund("Silver Bond Fund"), FundCategory::Silver);
        assert_eq!(categorize_fund("Aggressive Hybrid Debt Fund"), FundCategory::Debt);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize_fund("MONEY MARKET FUND"), FundCategory::Debt);
        assert_eq!(categorize_fund("balanced fund"), FundCategory::Hybrid);
        assert_eq!(categorize_fund(""), FundCategory::Equity);
    }
}
