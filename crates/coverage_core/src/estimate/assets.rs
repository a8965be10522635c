//! Typed asset declaration and exposure.

use super::amount::AssetAmount;
use super::gap::CurrentCoverage;

/// Asset values captured from one form submission.
///
/// Built once at the form boundary and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetInput {
    pub home_value: AssetAmount,
    pub vehicle_value: AssetAmount,
    pub savings_value: AssetAmount,
    /// Annual household income, counted as one year of exposure.
    pub income_value: AssetAmount,
    /// Carried through for the summary; not part of exposure.
    pub life_insurance: AssetAmount,
    pub current_coverage: CurrentCoverage,
}

impl AssetInput {
    /// Input with every amount zero and no declared coverage.
    pub fn empty() -> Self {
        Self {
            home_value: AssetAmount::ZERO,
            vehicle_value: AssetAmount::ZERO,
            savings_value: AssetAmount::ZERO,
            income_value: AssetAmount::ZERO,
            life_insurance: AssetAmount::ZERO,
            current_coverage: CurrentCoverage::Unspecified,
        }
    }
}

/// Total exposure: `home + vehicle + savings + income`.
///
/// No multiplier is applied to income. Each field is finite, but their sum
/// can still overflow; it saturates at `f64::MAX` so exposure stays finite.
pub fn compute_exposure(input: &AssetInput) -> f64 {
    let total = input.home_value.value()
        + input.vehicle_value.value()
        + input.savings_value.value()
        + input.income_value.value();
    if total.is_finite() { total } else { f64::MAX }
}
