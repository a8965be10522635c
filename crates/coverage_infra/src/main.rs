//! `coverage-cli`: command-line shell around the exposure engine.
//!
//! JSON goes to stdout, logs to stderr. Exit codes: 0 ok, 1 the form was
//! rejected (required fields), 2 any other failure.

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use coverage_core::estimate::{EstimateMetrics, SessionResult, estimate_with};
use coverage_infra::config::{ConfigError, EstimatorConfig};
use coverage_infra::form::{
    ContactDetails, FormError, FormMetrics, FormSubmission, REQUIRED_FIELDS_MESSAGE,
};
use coverage_infra::message::{MessageError, compose_summary};
use coverage_infra::report::{EstimateReport, tier_table};
use coverage_infra::session::ResultSlot;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_OK: u8 = 0;
const EXIT_REJECTED: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "coverage-cli", about = "Liability coverage exposure estimator")]
#[command(version)]
struct Cli {
    /// JSON config file overriding thresholds, recipient or booking URL
    #[arg(long, global = true, env = "COVERAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate exposure and recommend a coverage tier
    Estimate {
        /// Form submission as JSON ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        form: PathBuf,
    },

    /// Estimate, then compose the pre-filled summary message
    Email {
        /// Form submission as JSON ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        form: PathBuf,

        /// Sender name
        #[arg(long)]
        name: Option<String>,

        /// Sender email
        #[arg(long)]
        email: Option<String>,
    },

    /// Print the appointment booking URL
    Book,

    /// Print the recommendation bands and current-coverage table
    Tiers,
}

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Form(FormError),
    Message(MessageError),
    Input { path: PathBuf, reason: String },
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Form(e) => write!(f, "{e}"),
            Self::Message(e) => write!(f, "{e}"),
            Self::Input { path, reason } => {
                write!(f, "failed to read {}: {reason}", path.display())
            }
            Self::Output(reason) => write!(f, "failed to encode output: {reason}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<FormError> for CliError {
    fn from(e: FormError) -> Self {
        Self::Form(e)
    }
}

impl From<MessageError> for CliError {
    fn from(e: MessageError) -> Self {
        Self::Message(e)
    }
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Form(FormError::MissingRequired { .. }) => EXIT_REJECTED,
            _ => EXIT_ERROR,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailOutput {
    recipient: String,
    subject: String,
    body: String,
    mailto: String,
    estimate: EstimateReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookOutput {
    booking_url: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(err) => {
            if matches!(err, CliError::Form(FormError::MissingRequired { .. })) {
                eprintln!("{REQUIRED_FIELDS_MESSAGE}");
            }
            tracing::error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = EstimatorConfig::load(cli.config.as_deref())?;
    let mut slot = ResultSlot::new();

    match cli.command {
        Commands::Estimate { form } => {
            let result = run_estimate(&form, &config, &mut slot)?;
            print_json(&EstimateReport::from(result))
        }
        Commands::Email { form, name, email } => {
            run_estimate(&form, &config, &mut slot)?;
            let contact = ContactDetails {
                user_name: name,
                user_email: email,
            }
            .validate()?;
            let message = compose_summary(slot.latest(), &contact, &config.recipient)?;
            let mailto = message.mailto_url()?;
            let estimate = slot
                .latest()
                .map(EstimateReport::from)
                .ok_or(MessageError::NoResult)?;
            print_json(&EmailOutput {
                recipient: message.recipient,
                subject: message.subject,
                body: message.body,
                mailto: mailto.to_string(),
                estimate,
            })
        }
        Commands::Book => print_json(&BookOutput {
            booking_url: config.booking_url.to_string(),
        }),
        Commands::Tiers => print_json(&tier_table(&config.thresholds)),
    }
}

fn run_estimate<'a>(
    form_path: &Path,
    config: &EstimatorConfig,
    slot: &'a mut ResultSlot,
) -> Result<&'a SessionResult, CliError> {
    let text = read_input(form_path)?;
    let submission = FormSubmission::from_json(&text)?;

    let mut form_metrics = FormMetrics::new();
    submission.validate_required(&mut form_metrics)?;
    let input = submission.to_asset_input(&mut form_metrics);

    let mut metrics = EstimateMetrics::new();
    let result = estimate_with(input, &config.thresholds, &mut metrics);
    tracing::debug!(
        "form coerced_fields={} negative_clamped={} coverage_defaulted={}",
        form_metrics.coerced_field_total(),
        form_metrics.negative_clamped_total(),
        metrics.coverage_defaulted_total()
    );

    slot.store(result);
    slot.latest().ok_or(CliError::Message(MessageError::NoResult))
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let to_err = |e: io::Error| CliError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(to_err)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(to_err)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{text}");
    Ok(())
}
