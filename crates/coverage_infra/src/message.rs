//! Pre-filled summary message and its `mailto:` link.

use std::fmt;

use coverage_core::estimate::{SessionResult, format_reference};
use coverage_core::format::format_currency;
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::form::Contact;

/// Summary ready to hand to a mail client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// No estimate has been run yet.
    NoResult,
    /// Recipient could not be turned into a mailto URL.
    InvalidRecipient { recipient: String, reason: String },
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResult => write!(f, "no estimate to summarise; run an estimate first"),
            Self::InvalidRecipient { recipient, reason } => {
                write!(f, "cannot address message to {recipient:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for MessageError {}

pub fn subject_line(contact: &Contact) -> String {
    format!("MyProtection Number Results - {}", contact.name)
}

/// Compose the summary for the most recent estimate.
pub fn compose_summary(
    result: Option<&SessionResult>,
    contact: &Contact,
    recipient: &str,
) -> Result<ComposedMessage, MessageError> {
    let result = result.ok_or(MessageError::NoResult)?;
    let input = &result.input;

    let body = format!(
        "MyProtection Number Results\n\
         \n\
         Name: {name}\n\
         Email: {email}\n\
         \n\
         ASSET INFORMATION:\n\
         - Home Value: {home}\n\
         - Vehicle Value: {vehicle}\n\
         - Savings & Investments: {savings}\n\
         - Annual Household Income: {income}\n\
         - Life Insurance: {life}\n\
         - Current Auto Coverage: {current}\n\
         \n\
         RESULTS:\n\
         - Total Protection Exposure: {exposure}\n\
         - Recommended Coverage: {tier}\n\
         - Gap Analysis: {gap}\n\
         - Reference: {reference}\n\
         \n\
         Next Steps: {next_steps}\n\
         \n\
         This analysis was generated by the MyProtection educational tool.\n\
         This is not a quote, offer, or guarantee of coverage.\n\
         \n\
         Best regards,\n\
         {name}\n",
        name = contact.name,
        email = contact.email,
        home = format_currency(input.home_value.value()),
        vehicle = format_currency(input.vehicle_value.value()),
        savings = format_currency(input.savings_value.value()),
        income = format_currency(input.income_value.value()),
        life = format_currency(input.life_insurance.value()),
        current = input.current_coverage.label(),
        exposure = format_currency(result.exposure),
        tier = result.recommendation.coverage_tier,
        gap = result.gap,
        reference = format_reference(result.reference),
        next_steps = result.recommendation.message,
    );

    Ok(ComposedMessage {
        recipient: recipient.to_string(),
        subject: subject_line(contact),
        body,
    })
}

impl ComposedMessage {
    /// `mailto:` URL with subject and body percent-encoded.
    pub fn mailto_url(&self) -> Result<Url, MessageError> {
        let mut url = Url::parse(&format!("mailto:{}", self.recipient)).map_err(|e| {
            MessageError::InvalidRecipient {
                recipient: self.recipient.clone(),
                reason: e.to_string(),
            }
        })?;
        let query = format!(
            "subject={}&body={}",
            encode_component(&self.subject),
            encode_component(&self.body)
        );
        url.set_query(Some(&query));
        Ok(url)
    }
}

/// Percent-encode a query component, spaces as `%20` rather than `+`
/// since mail clients do not decode `+`.
fn encode_component(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
