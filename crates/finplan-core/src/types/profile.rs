//! Investor profile dimensions used to index the target allocation table.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// Investor age band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    /// Under 20.
    #[serde(rename = "0-20")]
    UpTo20,
    /// 20 to 30.
    #[serde(rename = "20-30")]
    From20To30,
    /// 30 to 40.
    #[serde(rename = "30-40")]
    From30To40,
    /// 40 to 50.
    #[serde(rename = "40-50")]
    From40To50,
    /// 50 to 60.
    #[serde(rename = "50-60")]
    From50To60,
    /// 60 and above.
    #[serde(rename = "60+")]
    Over60,
}

impl AgeGroup {
    /// Returns all age groups, youngest first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::UpTo20,
            Self::From20To30,
            Self::From30To40,
            Self::From40To50,
            Self::From50To60,
            Self::Over60,
        ]
    }

    /// Returns the band label (e.g. `30-40`).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::UpTo20 => "0-20",
            Self::From20To30 => "20-30",
            Self::From30To40 => "30-40",
            Self::From40To50 => "40-50",
            Self::From50To60 => "50-60",
            Self::Over60 => "60+",
        }
    }

    /// Maps an age in years to its band. Boundaries belong to the upper band.
    #[must_use]
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=19 => Self::UpTo20,
            20..=29 => Self::From20To30,
            30..=39 => Self::From30To40,
            40..=49 => Self::From40To50,
            50..=59 => Self::From50To60,
            _ => Self::Over60,
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|g| g.label() == trimmed)
            .ok_or_else(|| CoreError::UnknownAgeGroup {
                label: s.to_string(),
            })
    }
}

/// Investor risk appetite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskProfile {
    /// Capital preservation first.
    Conservative,
    /// Balanced growth.
    Moderate,
    /// Growth first.
    Aggressive,
}

impl RiskProfile {
    /// Returns all risk profiles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Conservative, Self::Moderate, Self::Aggressive]
    }

    /// Returns the upper-case label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Conservative => "CONSERVATIVE",
            Self::Moderate => "MODERATE",
            Self::Aggressive => "AGGRESSIVE",
        }
    }
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RiskProfile {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONSERVATIVE" => Ok(Self::Conservative),
            "MODERATE" => Ok(Self::Moderate),
            "AGGRESSIVE" => Ok(Self::Aggressive),
            _ => Err(CoreError::UnknownRiskProfile {
                label: s.to_string(),
            }),
        }
    }
}
