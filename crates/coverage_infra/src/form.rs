//! Form boundary: loosely typed submissions in, typed `AssetInput` out.
//!
//! The only validation here is required-field presence. Everything else is
//! coerced, never rejected.

use std::borrow::Cow;
use std::fmt;

use coverage_core::estimate::{AssetInput, Coercion, CurrentCoverage, ParsedAmount, parse_amount};
use serde::Deserialize;

/// Advisory shown when required fields are blank.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// A single form value as the browser or a JSON client might send it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl FormValue {
    fn as_text(&self) -> Cow<'_, str> {
        match self {
            FormValue::Number(n) => Cow::Owned(n.to_string()),
            FormValue::Text(s) => Cow::Borrowed(s.as_str()),
            FormValue::Flag(b) => Cow::Owned(b.to_string()),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, FormValue::Text(s) if s.trim().is_empty())
    }
}

/// The asset form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub home_value: Option<FormValue>,
    pub vehicle_value: Option<FormValue>,
    pub savings_value: Option<FormValue>,
    pub income_value: Option<FormValue>,
    pub current_coverage: Option<FormValue>,
    /// Shown in the summary only.
    pub life_insurance: Option<FormValue>,
}

/// The contact form shown before composing the summary message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

/// Contact details after the presence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

impl ContactDetails {
    pub fn validate(&self) -> Result<Contact, FormError> {
        let name = present(self.user_name.as_deref());
        let email = present(self.user_email.as_deref());
        match (name, email) {
            (Some(name), Some(email)) => Ok(Contact {
                name: name.to_string(),
                email: email.to_string(),
            }),
            (name, email) => {
                let mut fields = Vec::new();
                if name.is_none() {
                    fields.push("userName");
                }
                if email.is_none() {
                    fields.push("userEmail");
                }
                Err(FormError::MissingRequired { fields })
            }
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Form rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Required fields are absent or blank, in form order.
    MissingRequired { fields: Vec<&'static str> },
    /// Submission body is not a JSON object of the expected shape.
    Malformed { reason: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired { fields } => {
                write!(f, "{REQUIRED_FIELDS_MESSAGE} missing: {}", fields.join(", "))
            }
            Self::Malformed { reason } => write!(f, "malformed form submission: {reason}"),
        }
    }
}

impl std::error::Error for FormError {}

/// Counters for the form boundary.
#[derive(Debug, Default)]
pub struct FormMetrics {
    submission_total: u64,
    required_reject_total: u64,
    coerced_field_total: u64,
    negative_clamped_total: u64,
}

impl FormMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission_total(&self) -> u64 {
        self.submission_total
    }

    pub fn required_reject_total(&self) -> u64 {
        self.required_reject_total
    }

    /// Numeric fields that resolved to zero for any reason.
    pub fn coerced_field_total(&self) -> u64 {
        self.coerced_field_total
    }

    pub fn negative_clamped_total(&self) -> u64 {
        self.negative_clamped_total
    }

    fn record_coercion(&mut self, reason: Coercion) {
        self.coerced_field_total += 1;
        if reason == Coercion::Negative {
            self.negative_clamped_total += 1;
        }
    }
}

impl FormSubmission {
    pub fn from_json(text: &str) -> Result<Self, FormError> {
        serde_json::from_str(text).map_err(|e| FormError::Malformed {
            reason: e.to_string(),
        })
    }

    fn required_fields(&self) -> [(&'static str, Option<&FormValue>); 5] {
        [
            ("homeValue", self.home_value.as_ref()),
            ("vehicleValue", self.vehicle_value.as_ref()),
            ("savingsValue", self.savings_value.as_ref()),
            ("incomeValue", self.income_value.as_ref()),
            ("currentCoverage", self.current_coverage.as_ref()),
        ]
    }

    /// Fail when any required field is absent or blank.
    pub fn validate_required(&self, metrics: &mut FormMetrics) -> Result<(), FormError> {
        let fields: Vec<&'static str> = self
            .required_fields()
            .into_iter()
            .filter(|(_, value)| value.is_none_or(FormValue::is_blank))
            .map(|(name, _)| name)
            .collect();
        if fields.is_empty() {
            return Ok(());
        }
        metrics.required_reject_total += 1;
        tracing::info!("form rejected missing={:?}", fields);
        Err(FormError::MissingRequired { fields })
    }

    /// Build the typed input. Never fails; unusable values become zero.
    pub fn to_asset_input(&self, metrics: &mut FormMetrics) -> AssetInput {
        metrics.submission_total += 1;
        let mut amount = |name: &'static str, value: &Option<FormValue>| {
            let text = value.as_ref().map(FormValue::as_text);
            let ParsedAmount { amount, coercion } = parse_amount(text.as_deref());
            if let Some(reason) = coercion {
                metrics.record_coercion(reason);
                tracing::debug!("field {name} coerced to 0 reason={:?}", reason);
            }
            amount
        };

        let home_value = amount("homeValue", &self.home_value);
        let vehicle_value = amount("vehicleValue", &self.vehicle_value);
        let savings_value = amount("savingsValue", &self.savings_value);
        let income_value = amount("incomeValue", &self.income_value);
        let life_insurance = amount("lifeInsurance", &self.life_insurance);

        let current_label = self.current_coverage.as_ref().map(FormValue::as_text);
        let current_coverage = CurrentCoverage::from_optional_label(current_label.as_deref());

        AssetInput {
            home_value,
            vehicle_value,
            savings_value,
            income_value,
            life_insurance,
            current_coverage,
        }
    }
}
