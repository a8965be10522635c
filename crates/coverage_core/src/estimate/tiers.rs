//! Recommended coverage tiers and the exposure step function.
//!
//! Bands are evaluated in ascending order and the first match wins, so each
//! threshold is an inclusive upper bound:
//!
//! | exposure ≤ | tier                     | category     |
//! |------------|--------------------------|--------------|
//! | 60,000     | `30/60`                  | insufficient |
//! | 100,000    | `50/100`                 | insufficient |
//! | 300,000    | `100/300`                | adequate     |
//! | 500,000    | `500/500`                | adequate     |
//! | above      | `500/500 + $1M Umbrella` | excellent    |

use std::fmt;

/// Liability tier the engine can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoverageTier {
    Limits30_60,
    Limits50_100,
    Limits100_300,
    Limits500_500,
    Limits500_500Umbrella,
}

pub const UMBRELLA_TIER_LABEL: &str = "500/500 + $1M Umbrella";

/// Every tier in ascending order of limit.
pub const ALL_TIERS: &[CoverageTier] = &[
    CoverageTier::Limits30_60,
    CoverageTier::Limits50_100,
    CoverageTier::Limits100_300,
    CoverageTier::Limits500_500,
    CoverageTier::Limits500_500Umbrella,
];

impl CoverageTier {
    pub fn label(self) -> &'static str {
        match self {
            CoverageTier::Limits30_60 => "30/60",
            CoverageTier::Limits50_100 => "50/100",
            CoverageTier::Limits100_300 => "100/300",
            CoverageTier::Limits500_500 => "500/500",
            CoverageTier::Limits500_500Umbrella => UMBRELLA_TIER_LABEL,
        }
    }

    /// Per-person limit in USD used for gap comparison.
    ///
    /// The umbrella bundle counts as a flat $1M.
    pub fn limit_usd(self) -> u64 {
        match self {
            CoverageTier::Limits30_60 => 30_000,
            CoverageTier::Limits50_100 => 50_000,
            CoverageTier::Limits100_300 => 100_000,
            CoverageTier::Limits500_500 => 500_000,
            CoverageTier::Limits500_500Umbrella => 1_000_000,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        ALL_TIERS.iter().copied().find(|t| t.label() == label)
    }

    pub fn gap_category(self) -> GapCategory {
        match self {
            CoverageTier::Limits30_60 | CoverageTier::Limits50_100 => GapCategory::Insufficient,
            CoverageTier::Limits100_300 | CoverageTier::Limits500_500 => GapCategory::Adequate,
            CoverageTier::Limits500_500Umbrella => GapCategory::Excellent,
        }
    }

    /// Advisory shown next to the recommendation.
    pub fn message(self) -> &'static str {
        match self {
            CoverageTier::Limits30_60 => "You may need higher coverage to protect your assets",
            CoverageTier::Limits50_100 => "Consider increasing your liability coverage",
            CoverageTier::Limits100_300 => "Your current coverage may be adequate",
            CoverageTier::Limits500_500 => "Higher limits recommended for better protection",
            CoverageTier::Limits500_500Umbrella => "Excellent coverage for high-value assets",
        }
    }
}

impl fmt::Display for CoverageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse rating attached to a recommendation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapCategory {
    Insufficient,
    Adequate,
    Excellent,
}

impl GapCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            GapCategory::Insufficient => "insufficient",
            GapCategory::Adequate => "adequate",
            GapCategory::Excellent => "excellent",
        }
    }
}

impl fmt::Display for GapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommendation derived from an exposure figure. Recreated on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub coverage_tier: CoverageTier,
    pub gap_category: GapCategory,
    pub message: &'static str,
}

impl From<CoverageTier> for Recommendation {
    fn from(tier: CoverageTier) -> Self {
        Self {
            coverage_tier: tier,
            gap_category: tier.gap_category(),
            message: tier.message(),
        }
    }
}

/// Inclusive upper bounds for the first four bands, in USD.
///
/// Exposure above `limits_500_500_max` selects the umbrella tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierThresholds {
    /// Default: 60,000.
    pub limits_30_60_max: f64,
    /// Default: 100,000.
    pub limits_50_100_max: f64,
    /// Default: 300,000.
    pub limits_100_300_max: f64,
    /// Default: 500,000.
    pub limits_500_500_max: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            limits_30_60_max: 60_000.0,
            limits_50_100_max: 100_000.0,
            limits_100_300_max: 300_000.0,
            limits_500_500_max: 500_000.0,
        }
    }
}

impl TierThresholds {
    /// Bands in evaluation order.
    pub fn bands(&self) -> [(f64, CoverageTier); 4] {
        [
            (self.limits_30_60_max, CoverageTier::Limits30_60),
            (self.limits_50_100_max, CoverageTier::Limits50_100),
            (self.limits_100_300_max, CoverageTier::Limits100_300),
            (self.limits_500_500_max, CoverageTier::Limits500_500),
        ]
    }

    /// Thresholds must be finite, non-negative and strictly ascending for
    /// the bands not to overlap.
    pub fn is_valid(&self) -> bool {
        let bands = self.bands();
        bands.iter().all(|(t, _)| t.is_finite() && *t >= 0.0)
            && bands.windows(2).all(|w| w[0].0 < w[1].0)
    }
}

/// Map exposure to a recommendation using the default bands.
pub fn recommend(exposure: f64) -> Recommendation {
    recommend_with(exposure, &TierThresholds::default())
}

/// Map exposure to a recommendation using caller-supplied bands.
///
/// NaN exposure cannot satisfy any `<=` comparison and lands in the top
/// band; the pipeline never produces it since amounts are clamped finite
/// and their sum saturates at `f64::MAX`.
pub fn recommend_with(exposure: f64, thresholds: &TierThresholds) -> Recommendation {
    let tier = thresholds
        .bands()
        .into_iter()
        .find(|(max, _)| exposure <= *max)
        .map(|(_, tier)| tier)
        .unwrap_or(CoverageTier::Limits500_500Umbrella);
    Recommendation::from(tier)
}
