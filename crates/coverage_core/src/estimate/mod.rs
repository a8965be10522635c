//! Exposure engine: asset amounts in, recommendation and gap out.

pub mod amount;
pub mod assets;
pub mod gap;
pub mod pipeline;
pub mod reference;
pub mod tiers;

pub use amount::{AssetAmount, Coercion, ParsedAmount, parse_amount};
pub use assets::{AssetInput, compute_exposure};
pub use gap::{
    CURRENT_COVERAGE_LIMITS, CurrentCoverage, DEFAULT_CURRENT_LIMIT_USD, GapAnalysisResult,
    analyze_gap, analyze_gap_labels, recommended_limit_usd,
};
pub use pipeline::{EstimateMetrics, SessionResult, estimate, estimate_with};
pub use reference::{compute_reference, format_reference};
pub use tiers::{
    ALL_TIERS, CoverageTier, GapCategory, Recommendation, TierThresholds, UMBRELLA_TIER_LABEL,
    recommend, recommend_with,
};
