//! Estimator configuration and built-in defaults.
//!
//! Every tunable has a built-in default. An explicit value overrides it but
//! must be finite and non-negative; anything else fails closed with a
//! `ConfigError` rather than silently falling back.
//!
//! Optional JSON file layout (every key optional, unknown keys rejected):
//!
//! ```json
//! {
//!   "limits_30_60_max": 60000,
//!   "limits_50_100_max": 100000,
//!   "limits_100_300_max": 300000,
//!   "limits_500_500_max": 500000,
//!   "recipient": "agent@example.com",
//!   "booking_url": "https://example.com/book"
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use coverage_core::estimate::TierThresholds;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_RECIPIENT: &str = "Tre.Scott@countryfinancial.com";

pub const DEFAULT_BOOKING_URL: &str = "https://outlook.office365.com/book/TreScottAgencyCOUNTRYFinancial@countryfinancial.com/?RefID=rep_bio&ismsaljsauthenabled=true";

/// Numeric configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    Limits30_60Max,
    Limits50_100Max,
    Limits100_300Max,
    Limits500_500Max,
}

pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::Limits30_60Max,
    ConfigParam::Limits50_100Max,
    ConfigParam::Limits100_300Max,
    ConfigParam::Limits500_500Max,
];

/// Built-in default for a parameter.
pub fn default_value(param: ConfigParam) -> f64 {
    let defaults = TierThresholds::default();
    match param {
        ConfigParam::Limits30_60Max => defaults.limits_30_60_max,
        ConfigParam::Limits50_100Max => defaults.limits_50_100_max,
        ConfigParam::Limits100_300Max => defaults.limits_100_300_max,
        ConfigParam::Limits500_500Max => defaults.limits_500_500_max,
    }
}

/// snake_case key used in the config file.
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::Limits30_60Max => "limits_30_60_max",
        ConfigParam::Limits50_100Max => "limits_50_100_max",
        ConfigParam::Limits100_300Max => "limits_100_300_max",
        ConfigParam::Limits500_500Max => "limits_500_500_max",
    }
}

/// Configuration failure. Always fatal for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidValue {
        param_name: &'static str,
        reason: &'static str,
    },
    ThresholdsNotAscending,
    InvalidBookingUrl {
        url: String,
        reason: String,
    },
    InvalidRecipient {
        recipient: String,
    },
    Read {
        path: PathBuf,
        reason: String,
    },
    Parse {
        path: PathBuf,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { param_name, reason } => {
                write!(f, "config fail-closed: '{param_name}' {reason}")
            }
            Self::ThresholdsNotAscending => {
                write!(f, "config fail-closed: tier thresholds must be strictly ascending")
            }
            Self::InvalidBookingUrl { url, reason } => {
                write!(f, "config fail-closed: booking_url {url:?} {reason}")
            }
            Self::InvalidRecipient { recipient } => {
                write!(f, "config fail-closed: recipient {recipient:?} is not an email address")
            }
            Self::Read { path, reason } => {
                write!(f, "failed to read config {}: {reason}", path.display())
            }
            Self::Parse { path, reason } => {
                write!(f, "invalid config {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolve one numeric parameter.
///
/// - `Some(v)` finite and non-negative → `v`.
/// - `Some(v)` otherwise → `Err` (fail-closed).
/// - `None` → built-in default.
pub fn resolve_config_value(param: ConfigParam, value: Option<f64>) -> Result<f64, ConfigError> {
    match value {
        Some(v) if !v.is_finite() => Err(ConfigError::InvalidValue {
            param_name: param_name(param),
            reason: "is non-finite (NaN or Infinity)",
        }),
        Some(v) if v < 0.0 => Err(ConfigError::InvalidValue {
            param_name: param_name(param),
            reason: "is negative",
        }),
        Some(v) => Ok(v),
        None => Ok(default_value(param)),
    }
}

/// Raw config file contents before defaults and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub limits_30_60_max: Option<f64>,
    pub limits_50_100_max: Option<f64>,
    pub limits_100_300_max: Option<f64>,
    pub limits_500_500_max: Option<f64>,
    pub recipient: Option<String>,
    pub booking_url: Option<Url>,
}

impl ConfigFile {
    fn value(&self, param: ConfigParam) -> Option<f64> {
        match param {
            ConfigParam::Limits30_60Max => self.limits_30_60_max,
            ConfigParam::Limits50_100Max => self.limits_50_100_max,
            ConfigParam::Limits100_300Max => self.limits_100_300_max,
            ConfigParam::Limits500_500Max => self.limits_500_500_max,
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    pub thresholds: TierThresholds,
    pub recipient: String,
    pub booking_url: Url,
}

fn parse_booking_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidBookingUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "https" | "http" => Ok(url),
        other => Err(ConfigError::InvalidBookingUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

impl EstimatorConfig {
    /// Built-in defaults.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_file(ConfigFile::default())
    }

    /// Apply defaults and validate a parsed config file.
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let resolve = |param| resolve_config_value(param, file.value(param));
        let thresholds = TierThresholds {
            limits_30_60_max: resolve(ConfigParam::Limits30_60Max)?,
            limits_50_100_max: resolve(ConfigParam::Limits50_100Max)?,
            limits_100_300_max: resolve(ConfigParam::Limits100_300Max)?,
            limits_500_500_max: resolve(ConfigParam::Limits500_500Max)?,
        };
        if !thresholds.is_valid() {
            return Err(ConfigError::ThresholdsNotAscending);
        }

        let recipient = match file.recipient {
            Some(r) => validate_recipient(r)?,
            None => DEFAULT_RECIPIENT.to_string(),
        };
        let booking_url = match file.booking_url {
            Some(url) => parse_booking_url(url.as_str())?,
            None => parse_booking_url(DEFAULT_BOOKING_URL)?,
        };

        Ok(Self {
            thresholds,
            recipient,
            booking_url,
        })
    }

    /// Parse JSON config text.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_file(file)
    }

    /// Load from an optional JSON file; `None` yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("no config file given; using built-in defaults");
            return Self::defaults();
        };
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_json(&text, path)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

fn validate_recipient(recipient: String) -> Result<String, ConfigError> {
    let trimmed = recipient.trim();
    let well_formed = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !trimmed.contains(char::is_whitespace)
                && Url::parse(&format!("mailto:{trimmed}")).is_ok()
        }
        None => false,
    };
    if well_formed {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidRecipient { recipient })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_params_have_unique_names() {
        let mut names: Vec<&str> = ALL_PARAMS.iter().map(|&p| param_name(p)).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ALL_PARAMS.len());
    }

    #[test]
    fn defaults_match_core_thresholds() {
        let resolved: Vec<f64> = ALL_PARAMS
            .iter()
            .map(|&p| resolve_config_value(p, None).unwrap())
            .collect();
        assert_eq!(resolved, vec![60_000.0, 100_000.0, 300_000.0, 500_000.0]);
    }

    #[test]
    fn default_booking_url_parses() {
        let url = parse_booking_url(DEFAULT_BOOKING_URL).unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("outlook.office365.com"));
    }

    #[test]
    fn recipient_validation() {
        assert!(validate_recipient("a@b.com".to_string()).is_ok());
        assert!(validate_recipient("nobody".to_string()).is_err());
        assert!(validate_recipient("a b@c.com".to_string()).is_err());
        assert!(validate_recipient("@c.com".to_string()).is_err());
    }
}
