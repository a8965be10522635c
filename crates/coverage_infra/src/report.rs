//! JSON view of an estimate for the presentation shell.

use coverage_core::estimate::{
    ALL_TIERS, CURRENT_COVERAGE_LIMITS, SessionResult, TierThresholds, format_reference,
};
use coverage_core::format::format_currency;
use serde::Serialize;

/// Flat rendering of a [`SessionResult`], keyed the way the form is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub home_value: f64,
    pub vehicle_value: f64,
    pub savings_value: f64,
    pub income_value: f64,
    pub life_insurance: f64,
    pub current_coverage: String,
    pub current_coverage_limit: u64,
    /// True when the current limit is the 50,000 fallback.
    pub current_coverage_defaulted: bool,
    pub exposure: f64,
    pub exposure_display: String,
    pub recommendation: &'static str,
    pub gap_category: &'static str,
    pub gap_analysis: &'static str,
    pub message: &'static str,
    pub reference: String,
}

impl From<&SessionResult> for EstimateReport {
    fn from(result: &SessionResult) -> Self {
        let input = &result.input;
        Self {
            home_value: input.home_value.value(),
            vehicle_value: input.vehicle_value.value(),
            savings_value: input.savings_value.value(),
            income_value: input.income_value.value(),
            life_insurance: input.life_insurance.value(),
            current_coverage: input.current_coverage.label().to_string(),
            current_coverage_limit: input.current_coverage.limit_usd(),
            current_coverage_defaulted: input.current_coverage.is_defaulted(),
            exposure: result.exposure,
            exposure_display: format_currency(result.exposure),
            recommendation: result.recommendation.coverage_tier.label(),
            gap_category: result.recommendation.gap_category.as_str(),
            gap_analysis: result.gap.as_str(),
            message: result.recommendation.message,
            reference: format_reference(result.reference),
        }
    }
}

/// One recommendation band.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRow {
    pub tier: &'static str,
    /// Inclusive upper bound; `None` for the open-ended top band.
    pub max_exposure: Option<f64>,
    pub limit: u64,
    pub gap_category: &'static str,
    pub message: &'static str,
}

/// Known current-coverage label and the limit it resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCoverageRow {
    pub label: &'static str,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierTable {
    pub recommended: Vec<TierRow>,
    pub current: Vec<CurrentCoverageRow>,
}

/// The tables the engine decides with, for display or audit.
pub fn tier_table(thresholds: &TierThresholds) -> TierTable {
    let bands = thresholds.bands();
    let recommended = ALL_TIERS
        .iter()
        .map(|&tier| TierRow {
            tier: tier.label(),
            max_exposure: bands.iter().find(|(_, t)| *t == tier).map(|(max, _)| *max),
            limit: tier.limit_usd(),
            gap_category: tier.gap_category().as_str(),
            message: tier.message(),
        })
        .collect();
    let current = CURRENT_COVERAGE_LIMITS
        .iter()
        .map(|&(label, limit)| CurrentCoverageRow { label, limit })
        .collect();
    TierTable {
        recommended,
        current,
    }
}
