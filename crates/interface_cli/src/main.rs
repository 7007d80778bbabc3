//! Eligibility Engine - Command Line Binary
//!
//! Evaluates a birth date against a product's age window and, optionally,
//! a requested sum assured against the product's cap.
//!
//! # Usage
//!
//! ```bash
//! # Entry check for the critical illness rider
//! eligibility-check check --birth-date 1955-08-09 --product bhn
//!
//! # Renewal check with a sum assured, as JSON
//! eligibility-check --json check --birth-date 1960-03-01 --product accident \
//!     --renewal --sum-assured 8000000000
//!
//! # Print the catalog
//! eligibility-check catalog
//! ```
//!
//! # Environment Variables
//!
//! * `ELIGIBILITY_REFERENCE_DATE` - Reference date for age math (default: 2025-08-09)
//! * `ELIGIBILITY_MAX_SUPPLEMENTARY_COUNT` - Supplementary insured capacity (default: 10)
//! * `ELIGIBILITY_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use domain_eligibility::EngineConfig;
use interface_cli::{run, Cli};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exits with status 1 when the check does not pass
fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = EngineConfig::from_env().context("loading ELIGIBILITY_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        reference_date = %config.reference_date,
        max_supplementary_count = config.max_supplementary_count,
        "Eligibility engine configured"
    );

    let mut stdout = std::io::stdout().lock();
    let passed = run(&cli, config, &mut stdout)?;

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initializes the tracing subscriber
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so JSON
/// output on stdout stays parseable.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
