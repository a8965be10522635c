//! Gap analysis: declared current coverage vs recommended tier.
//!
//! Current coverage resolves through a fixed label table, matched exactly.
//! "Not sure", a blank answer and any unlisted label (including a padded
//! copy of a listed one) all resolve to [`DEFAULT_CURRENT_LIMIT_USD`]; the
//! variant keeps which one it was.

use std::fmt;

use super::tiers::{CoverageTier, UMBRELLA_TIER_LABEL};

/// Limit assumed when the declared coverage is unknown.
pub const DEFAULT_CURRENT_LIMIT_USD: u64 = 50_000;

pub const NOT_SURE_LABEL: &str = "Not sure";

/// Known declared-coverage labels and their per-person limits.
pub const CURRENT_COVERAGE_LIMITS: &[(&str, u64)] = &[
    (NOT_SURE_LABEL, DEFAULT_CURRENT_LIMIT_USD),
    ("25/50", 25_000),
    ("30/60", 30_000),
    ("50/100", 50_000),
    ("100/300", 100_000),
    ("250/500", 250_000),
    ("500/500", 500_000),
    ("500/1000", 500_000),
];

/// Coverage the user reports holding today.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CurrentCoverage {
    /// A label from [`CURRENT_COVERAGE_LIMITS`] other than "Not sure".
    Listed { label: &'static str, limit_usd: u64 },
    /// The user picked "Not sure".
    NotSure,
    /// No answer given.
    Unspecified,
    /// A label outside the table, kept verbatim.
    Unrecognized(String),
}

impl CurrentCoverage {
    pub fn from_label(label: &str) -> Self {
        if label.trim().is_empty() {
            return CurrentCoverage::Unspecified;
        }
        if label == NOT_SURE_LABEL {
            return CurrentCoverage::NotSure;
        }
        match CURRENT_COVERAGE_LIMITS.iter().find(|(l, _)| *l == label) {
            Some(&(label, limit_usd)) => CurrentCoverage::Listed { label, limit_usd },
            None => CurrentCoverage::Unrecognized(label.to_string()),
        }
    }

    pub fn from_optional_label(label: Option<&str>) -> Self {
        label.map_or(CurrentCoverage::Unspecified, Self::from_label)
    }

    pub fn limit_usd(&self) -> u64 {
        match self {
            CurrentCoverage::Listed { limit_usd, .. } => *limit_usd,
            CurrentCoverage::NotSure
            | CurrentCoverage::Unspecified
            | CurrentCoverage::Unrecognized(_) => DEFAULT_CURRENT_LIMIT_USD,
        }
    }

    /// True when the limit came from the fallback rather than a real tier.
    pub fn is_defaulted(&self) -> bool {
        !matches!(self, CurrentCoverage::Listed { .. })
    }

    /// Label as the user supplied it (empty when unspecified).
    pub fn label(&self) -> &str {
        match self {
            CurrentCoverage::Listed { label, .. } => label,
            CurrentCoverage::NotSure => NOT_SURE_LABEL,
            CurrentCoverage::Unspecified => "",
            CurrentCoverage::Unrecognized(raw) => raw,
        }
    }
}

/// Outcome of comparing current against recommended limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapAnalysisResult {
    InsufficientCoverage,
    GoodMatch,
    WellCovered,
}

impl GapAnalysisResult {
    pub fn as_str(self) -> &'static str {
        match self {
            GapAnalysisResult::InsufficientCoverage => "Insufficient coverage",
            GapAnalysisResult::GoodMatch => "Good match",
            GapAnalysisResult::WellCovered => "Well covered",
        }
    }
}

impl fmt::Display for GapAnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare a declared coverage against a recommended tier.
pub fn analyze_gap(current: &CurrentCoverage, recommended: CoverageTier) -> GapAnalysisResult {
    compare_limits(current.limit_usd(), recommended.limit_usd())
}

/// String form of [`analyze_gap`] for callers holding raw labels.
///
/// Unknown current labels use the 50,000 default. The recommended label
/// resolves through [`recommended_limit_usd`].
pub fn analyze_gap_labels(current: &str, recommended: &str) -> GapAnalysisResult {
    let current = CurrentCoverage::from_label(current);
    compare_limits(current.limit_usd(), recommended_limit_usd(recommended))
}

/// Resolve a recommended-tier label to its per-person limit in USD.
///
/// The umbrella bundle is $1M. Otherwise the leading number of `"X/Y"` is
/// read as thousands. A label without a leading number resolves to 0.
pub fn recommended_limit_usd(label: &str) -> u64 {
    let label = label.trim();
    if label == UMBRELLA_TIER_LABEL {
        return 1_000_000;
    }
    if let Some(tier) = CoverageTier::from_label(label) {
        return tier.limit_usd();
    }
    let per_person = label.split('/').next().unwrap_or_default().trim();
    let digits: &str = {
        let end = per_person
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(per_person.len());
        &per_person[..end]
    };
    digits
        .parse::<u64>()
        .ok()
        .and_then(|thousands| thousands.checked_mul(1_000))
        .unwrap_or(0)
}

fn compare_limits(current: u64, recommended: u64) -> GapAnalysisResult {
    use std::cmp::Ordering;
    match current.cmp(&recommended) {
        Ordering::Less => GapAnalysisResult::InsufficientCoverage,
        Ordering::Equal => GapAnalysisResult::GoodMatch,
        Ordering::Greater => GapAnalysisResult::WellCovered,
    }
}
