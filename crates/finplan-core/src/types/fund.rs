//! Fund reference data and category classification.
//!
//! - [`FundCategory`]: The five ingestion-time categories (EQUITY, DEBT, HYBRID, GOLD, SILVER)
//! - [`AssetClass`]: The four analysis buckets; GOLD and SILVER share one bucket
//! - [`Fund`]: Static reference data for one scheme
//! - [`FundBook`]: Fund lookup table keyed by fund code

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::CoreError;

/// Category assigned to a fund once, at ingestion.
///
/// # Examples
///
/// ```
/// use finplan_core::types::{AssetClass, FundCategory};
///
/// assert_eq!(FundCategory::Gold.asset_class(), AssetClass::PreciousMetals);
/// assert_eq!(FundCategory::Silver.asset_class(), AssetClass::PreciousMetals);
/// assert!(FundCategory::Silver.is_precious_metal());
/// assert_eq!("debt".parse::<FundCategory>().unwrap(), FundCategory::Debt);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundCategory {
    /// Equity and index funds.
    Equity,
    /// Debt, gilt, liquid and money market funds.
    Debt,
    /// Hybrid and balanced advantage funds.
    Hybrid,
    /// Gold funds and gold ETFs.
    Gold,
    /// Silver funds and silver ETFs.
    Silver,
}

impl FundCategory {
    /// Returns all categories in a standard order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Equity,
            Self::Debt,
            Self::Hybrid,
            Self::Gold,
            Self::Silver,
        ]
    }

    /// Returns the upper-case code used in source data.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Equity => "EQUITY",
            Self::Debt => "DEBT",
            Self::Hybrid => "HYBRID",
            Self::Gold => "GOLD",
            Self::Silver => "SILVER",
        }
    }

    /// Returns the analysis bucket this category belongs to.
    #[must_use]
    pub fn asset_class(&self) -> AssetClass {
        match self {
            Self::Equity => AssetClass::Equity,
            Self::Debt => AssetClass::Debt,
            Self::Hybrid => AssetClass::Hybrid,
            Self::Gold | Self::Silver => AssetClass::PreciousMetals,
        }
    }

    /// Returns true for GOLD and SILVER.
    #[must_use]
    pub fn is_precious_metal(&self) -> bool {
        matches!(self, Self::Gold | Self::Silver)
    }
}

impl std::fmt::Display for FundCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FundCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EQUITY" => Ok(Self::Equity),
            "DEBT" => Ok(Self::Debt),
            "HYBRID" => Ok(Self::Hybrid),
            "GOLD" => Ok(Self::Gold),
            "SILVER" => Ok(Self::Silver),
            _ => Err(CoreError::UnknownFundCategory {
                label: s.to_string(),
            }),
        }
    }
}

/// Analysis bucket used by the category and allocation analyzers.
///
/// Closed set: adding a bucket forces every `match` in the analyzers to be
/// revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    /// Equity funds.
    Equity,
    /// Debt funds.
    Debt,
    /// Hybrid funds.
    Hybrid,
    /// Gold and silver funds combined.
    PreciousMetals,
}

impl AssetClass {
    /// Returns all asset classes in report order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Equity, Self::Debt, Self::Hybrid, Self::PreciousMetals]
    }

    /// Returns a human-readable label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equity => "Equity",
            Self::Debt => "Debt",
            Self::Hybrid => "Hybrid",
            Self::PreciousMetals => "Gold/Silver",
        }
    }

    /// Returns the fund categories that make up this bucket.
    #[must_use]
    pub fn categories(&self) -> &'static [FundCategory] {
        match self {
            Self::Equity => &[FundCategory::Equity],
            Self::Debt => &[FundCategory::Debt],
            Self::Hybrid => &[FundCategory::Hybrid],
            Self::PreciousMetals => &[FundCategory::Gold, FundCategory::Silver],
        }
    }

    /// Returns true if `category` belongs to this bucket.
    #[must_use]
    pub fn contains(&self, category: FundCategory) -> bool {
        category.asset_class() == *self
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Static reference data for a fund.
///
/// The category is fixed at construction; funds are looked up by code and
/// never mutated during analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    /// Fund code (e.g. `UTI_NIFTY`).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Category assigned at ingestion.
    pub category: FundCategory,
    /// Latest published NAV, if known.
    #[serde(default)]
    pub nav: Option<Decimal>,
    /// Current unit price, if known.
    #[serde(default)]
    pub current_price: Option<Decimal>,
}

impl Fund {
    /// Creates a fund with no pricing information.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, category: FundCategory) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category,
            nav: None,
            current_price: None,
        }
    }

    /// Sets the current unit price.
    #[must_use]
    pub fn with_current_price(mut self, price: Decimal) -> Self {
        self.current_price = Some(price);
        self
    }

    /// Sets the NAV.
    #[must_use]
    pub fn with_nav(mut self, nav: Decimal) -> Self {
        self.nav = Some(nav);
        self
    }

    /// Returns the current price, or `fallback` when none is recorded.
    ///
    /// A zero or negative price counts as unrecorded.
    #[must_use]
    pub fn price_or(&self, fallback: Decimal) -> Decimal {
        self.current_price
            .filter(|price| *price > Decimal::ZERO)
            .unwrap_or(fallback)
    }
}

/// Fund lookup table keyed by fund code.
///
/// Backed by a `BTreeMap` so iteration order is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundBook {
    funds: BTreeMap<String, Fund>,
}

impl FundBook {
    /// Creates an empty fund book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fund, replacing any previous entry with the same code.
    pub fn insert(&mut self, fund: Fund) -> Option<Fund> {
        self.funds.insert(fund.code.clone(), fund)
    }

    /// Adds a fund (builder style).
    #[must_use]
    pub fn with_fund(mut self, fund: Fund) -> Self {
        self.insert(fund);
        self
    }

    /// Looks up a fund by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Fund> {
        self.funds.get(code)
    }

    /// Returns true if the code is known.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.funds.contains_key(code)
    }

    /// Returns the category of a fund, or `None` for unknown codes.
    #[must_use]
    pub fn category_of(&self, code: &str) -> Option<FundCategory> {
        self.funds.get(code).map(|f| f.category)
    }

    /// Number of funds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.funds.len()
    }

    /// Returns true if the book has no funds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    /// Iterates over funds in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Fund> {
        self.funds.values()
    }
}

impl FromIterator<Fund> for FundBook {
    fn from_iter<I: IntoIterator<Item = Fund>>(iter: I) -> Self {
        let mut book = FundBook::new();
        for fund in iter {
            book.insert(fund);
        }
        book
    }
}
