//! Curated alternative-fund suggestions per category.

use finplan_core::{AssetClass, FundCategory};
use serde::{Deserialize, Serialize};

/// Hand-picked funds suggested as alternatives for each category.
///
/// These lists are data, not a ranking. The precious-metal list is the gold
/// list followed by the silver list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarqueeFunds {
    /// Equity suggestions.
    #[serde(default = "default_equity")]
    pub equity: Vec<String>,
    /// Debt suggestions.
    #[serde(default = "default_debt")]
    pub debt: Vec<String>,
    /// Hybrid suggestions.
    #[serde(default = "default_hybrid")]
    pub hybrid: Vec<String>,
    /// Gold suggestions.
    #[serde(default = "default_gold")]
    pub gold: Vec<String>,
    /// Silver suggestions.
    #[serde(default = "default_silver")]
    pub silver: Vec<String>,
}

impl Default for MarqueeFunds {
    fn default() -> Self {
        Self {
            equity: default_equity(),
            debt: default_debt(),
            hybrid: default_hybrid(),
            gold: default_gold(),
            silver: default_silver(),
        }
    }
}

impl MarqueeFunds {
    /// Suggestions for a single fund category.
    #[must_use]
    pub fn for_category(&self, category: FundCategory) -> &[String] {
        match category {
            FundCategory::Equity => &self.equity,
            FundCategory::Debt => &self.debt,
            FundCategory::Hybrid => &self.hybrid,
            FundCategory::Gold => &self.gold,
            FundCategory::Silver => &self.silver,
        }
    }

    /// Suggestions for an asset class, concatenating member categories.
    #[must_use]
    pub fn for_asset_class(&self, class: AssetClass) -> Vec<String> {
        class
            .categories()
            .iter()
            .flat_map(|c| self.for_category(*c).iter().cloned())
            .collect()
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn default_equity() -> Vec<String> {
    names(&[
        "UTI Nifty Index Fund",
        "SBI Sensex Index Fund",
        "HDFC Index Fund - Nifty 50 Plan",
    ])
}

fn default_debt() -> Vec<String> {
    names(&[
        "SBI Magnum Gilt Fund",
        "HDFC Short Term Debt Fund",
        "ICICI Prudential Liquid Fund",
    ])
}

fn default_hybrid() -> Vec<String> {
    names(&[
        "HDFC Balanced Advantage Fund",
        "ICICI Prudential Balanced Advantage Fund",
        "SBI Balanced Advantage Fund",
    ])
}

fn default_gold() -> Vec<String> {
    names(&[
        "Nippon India Gold Savings Fund",
        "HDFC Gold Fund",
        "SBI Gold Fund",
    ])
}

fn default_silver() -> Vec<String> {
    names(&["Kotak Silver ETF Fund", "ICICI Prudential Silver ETF Fund"])
}
