//! Form submission → typed input.

use coverage_core::estimate::CurrentCoverage;
use coverage_infra::form::{ContactDetails, FormError, FormMetrics, FormSubmission};

const FULL_FORM: &str = r#"{
    "homeValue": "200000",
    "vehicleValue": "20000",
    "savingsValue": "30000",
    "incomeValue": "50000",
    "currentCoverage": "50/100",
    "lifeInsurance": "250000"
}"#;

#[test]
fn test_full_form_passes_validation() {
    let form = FormSubmission::from_json(FULL_FORM).unwrap();
    let mut metrics = FormMetrics::new();
    assert_eq!(form.validate_required(&mut metrics), Ok(()));
    assert_eq!(metrics.required_reject_total(), 0);
}

#[test]
fn test_full_form_builds_typed_input() {
    let form = FormSubmission::from_json(FULL_FORM).unwrap();
    let mut metrics = FormMetrics::new();
    let input = form.to_asset_input(&mut metrics);

    assert_eq!(input.home_value.value(), 200_000.0);
    assert_eq!(input.vehicle_value.value(), 20_000.0);
    assert_eq!(input.savings_value.value(), 30_000.0);
    assert_eq!(input.income_value.value(), 50_000.0);
    assert_eq!(input.life_insurance.value(), 250_000.0);
    assert_eq!(input.current_coverage.limit_usd(), 50_000);
    assert!(!input.current_coverage.is_defaulted());
    assert_eq!(metrics.submission_total(), 1);
    assert_eq!(metrics.coerced_field_total(), 0);
}

#[test]
fn test_missing_and_blank_required_fields_listed_in_order() {
    let form = FormSubmission::from_json(
        r#"{"homeValue": "", "vehicleValue": "1", "savingsValue": "  ", "incomeValue": 0}"#,
    )
    .unwrap();
    let mut metrics = FormMetrics::new();
    let err = form.validate_required(&mut metrics).unwrap_err();
    assert_eq!(
        err,
        FormError::MissingRequired {
            fields: vec!["homeValue", "savingsValue", "currentCoverage"],
        }
    );
    assert!(err.to_string().starts_with("Please fill in all required fields."));
    assert_eq!(metrics.required_reject_total(), 1);
}

#[test]
fn test_numeric_zero_counts_as_present() {
    let form = FormSubmission::from_json(
        r#"{"homeValue": 0, "vehicleValue": 0, "savingsValue": 0, "incomeValue": 0,
            "currentCoverage": "Not sure"}"#,
    )
    .unwrap();
    assert_eq!(form.validate_required(&mut FormMetrics::new()), Ok(()));
}

#[test]
fn test_coercions_counted() {
    let form = FormSubmission::from_json(
        r#"{"homeValue": "-5000", "vehicleValue": "abc", "savingsValue": "12k",
            "incomeValue": "1e3", "currentCoverage": "Platinum"}"#,
    )
    .unwrap();
    let mut metrics = FormMetrics::new();
    let input = form.to_asset_input(&mut metrics);

    assert_eq!(input.home_value.value(), 0.0);
    assert_eq!(input.vehicle_value.value(), 0.0);
    assert_eq!(input.savings_value.value(), 12.0);
    assert_eq!(input.income_value.value(), 1_000.0);
    assert_eq!(
        input.current_coverage,
        CurrentCoverage::Unrecognized("Platinum".to_string())
    );
    // home (negative), vehicle (not numeric), lifeInsurance (missing).
    assert_eq!(metrics.coerced_field_total(), 3);
    assert_eq!(metrics.negative_clamped_total(), 1);
}

#[test]
fn test_contact_details_required() {
    let ok = ContactDetails {
        user_name: Some(" Pat ".to_string()),
        user_email: Some("pat@example.com".to_string()),
    }
    .validate()
    .unwrap();
    assert_eq!(ok.name, "Pat");

    let err = ContactDetails {
        user_name: Some("".to_string()),
        user_email: None,
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err,
        FormError::MissingRequired {
            fields: vec!["userName", "userEmail"],
        }
    );
}

#[test]
fn test_contact_details_from_json() {
    let details: ContactDetails =
        serde_json::from_str(r#"{"userName": "Pat", "userEmail": "pat@example.com"}"#).unwrap();
    assert!(details.validate().is_ok());
}
