//! Exposure → recommendation → gap, as one call.

use super::assets::{AssetInput, compute_exposure};
use super::gap::{GapAnalysisResult, analyze_gap};
use super::reference::compute_reference;
use super::tiers::{Recommendation, TierThresholds, recommend_with};

/// Everything the shell needs to render and later summarise one estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub input: AssetInput,
    pub exposure: f64,
    pub recommendation: Recommendation,
    pub gap: GapAnalysisResult,
    /// Stable xxh64 reference of the canonical inputs.
    pub reference: u64,
}

/// Counters for estimate outcomes.
#[derive(Debug, Default)]
pub struct EstimateMetrics {
    estimate_total: u64,
    coverage_defaulted_total: u64,
    insufficient_total: u64,
    good_match_total: u64,
    well_covered_total: u64,
}

impl EstimateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estimate_total(&self) -> u64 {
        self.estimate_total
    }

    /// Estimates whose current coverage fell back to the 50,000 default.
    pub fn coverage_defaulted_total(&self) -> u64 {
        self.coverage_defaulted_total
    }

    pub fn gap_total(&self, gap: GapAnalysisResult) -> u64 {
        match gap {
            GapAnalysisResult::InsufficientCoverage => self.insufficient_total,
            GapAnalysisResult::GoodMatch => self.good_match_total,
            GapAnalysisResult::WellCovered => self.well_covered_total,
        }
    }

    fn record(&mut self, gap: GapAnalysisResult, coverage_defaulted: bool) {
        self.estimate_total += 1;
        if coverage_defaulted {
            self.coverage_defaulted_total += 1;
        }
        match gap {
            GapAnalysisResult::InsufficientCoverage => self.insufficient_total += 1,
            GapAnalysisResult::GoodMatch => self.good_match_total += 1,
            GapAnalysisResult::WellCovered => self.well_covered_total += 1,
        }
    }
}

/// Run the full estimate with the default bands.
pub fn estimate(input: AssetInput, metrics: &mut EstimateMetrics) -> SessionResult {
    estimate_with(input, &TierThresholds::default(), metrics)
}

/// Run the full estimate with caller-supplied bands.
pub fn estimate_with(
    input: AssetInput,
    thresholds: &TierThresholds,
    metrics: &mut EstimateMetrics,
) -> SessionResult {
    let exposure = compute_exposure(&input);
    let recommendation = recommend_with(exposure, thresholds);
    let gap = analyze_gap(&input.current_coverage, recommendation.coverage_tier);
    let coverage_defaulted = input.current_coverage.is_defaulted();

    if coverage_defaulted {
        tracing::debug!(
            "current coverage defaulted label={:?} limit_usd={}",
            input.current_coverage.label(),
            input.current_coverage.limit_usd()
        );
    }
    metrics.record(gap, coverage_defaulted);

    let reference = compute_reference(&input, recommendation.coverage_tier);
    tracing::info!(
        "estimate exposure_usd={} tier={} gap={:?}",
        exposure,
        recommendation.coverage_tier,
        gap
    );

    SessionResult {
        input,
        exposure,
        recommendation,
        gap,
        reference,
    }
}
