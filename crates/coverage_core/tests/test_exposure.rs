//! Exposure sum and form-value coercion.

use coverage_core::estimate::{
    AssetAmount, AssetInput, CurrentCoverage, compute_exposure, parse_amount,
};
use proptest::prelude::*;

fn input_from_raw(home: &str, vehicle: &str, savings: &str, income: &str) -> AssetInput {
    AssetInput {
        home_value: parse_amount(Some(home)).amount,
        vehicle_value: parse_amount(Some(vehicle)).amount,
        savings_value: parse_amount(Some(savings)).amount,
        income_value: parse_amount(Some(income)).amount,
        life_insurance: AssetAmount::ZERO,
        current_coverage: CurrentCoverage::Unspecified,
    }
}

#[test]
fn test_exposure_sums_four_fields() {
    let input = input_from_raw("200000", "20000", "30000", "50000");
    assert_eq!(compute_exposure(&input), 300_000.0);
}

#[test]
fn test_income_has_no_multiplier() {
    let input = input_from_raw("", "", "", "85000");
    assert_eq!(compute_exposure(&input), 85_000.0);
}

#[test]
fn test_life_insurance_not_counted() {
    let mut input = input_from_raw("100", "0", "0", "0");
    input.life_insurance = AssetAmount::new(1_000_000.0);
    assert_eq!(compute_exposure(&input), 100.0);
}

#[test]
fn test_empty_and_garbage_fields_contribute_zero() {
    let input = input_from_raw("", "abc", "   ", "1000");
    assert_eq!(compute_exposure(&input), 1_000.0);

    let mut missing = AssetInput::empty();
    missing.home_value = parse_amount(None).amount;
    assert_eq!(compute_exposure(&missing), 0.0);
}

#[test]
fn test_negative_field_contributes_zero() {
    let input = input_from_raw("-50000", "10000", "0", "0");
    assert_eq!(compute_exposure(&input), 10_000.0);
}

#[test]
fn test_overflowing_sum_saturates_to_finite() {
    let input = input_from_raw("1e308", "1e308", "0", "0");
    assert!(input.home_value.value().is_finite());
    let exposure = compute_exposure(&input);
    assert!(exposure.is_finite());
    assert_eq!(exposure, f64::MAX);
}

proptest! {
    #[test]
    fn prop_exposure_is_exact_sum(
        h in 0.0f64..1e9,
        v in 0.0f64..1e9,
        s in 0.0f64..1e9,
        i in 0.0f64..1e9,
    ) {
        let input = AssetInput {
            home_value: AssetAmount::new(h),
            vehicle_value: AssetAmount::new(v),
            savings_value: AssetAmount::new(s),
            income_value: AssetAmount::new(i),
            life_insurance: AssetAmount::ZERO,
            current_coverage: CurrentCoverage::Unspecified,
        };
        prop_assert_eq!(compute_exposure(&input), h + v + s + i);
    }

    #[test]
    fn prop_non_numeric_text_is_zero(s in "[a-zA-Z$ ,]*") {
        // Strings without digits, or starting with a non-numeric char, never parse.
        prop_assume!(!s.trim_start().starts_with("Infinity"));
        prop_assert_eq!(parse_amount(Some(s.as_str())).amount, AssetAmount::ZERO);
    }

    #[test]
    fn prop_integer_text_round_trips(n in 0u32..10_000_000) {
        let parsed = parse_amount(Some(n.to_string().as_str()));
        prop_assert_eq!(parsed.amount.value(), f64::from(n));
        prop_assert!(parsed.coercion.is_none());
    }
}
