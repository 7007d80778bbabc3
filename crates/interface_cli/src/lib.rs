//! Command-line collaborator for the eligibility engine
//!
//! Parses arguments, runs one check (or prints the catalog) against a
//! configured engine, and renders the outcome as text or JSON.

use std::io::Write;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use core_kernel::{Money, ReferenceDate};
use domain_eligibility::{
    EligibilityError, EligibilityService, EligibilityVerdict, EngineConfig, Person, ProductCatalog,
    ProductId, ProductRule,
};

/// Eligibility and sum-assured checks
#[derive(Debug, Parser)]
#[command(name = "eligibility-check", version, about)]
pub struct Cli {
    /// Reference date for age math (overrides ELIGIBILITY_REFERENCE_DATE)
    #[arg(long, global = true)]
    pub reference_date: Option<NaiveDate>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one person against one product
    Check(CheckArgs),
    /// Print age ceilings and caps for every product
    Catalog,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    pub birth_date: NaiveDate,

    /// Product key, e.g. bhn
    #[arg(long)]
    pub product: ProductId,

    /// Evaluate against the renewal ceiling instead of the entry ceiling
    #[arg(long)]
    pub renewal: bool,

    /// Requested sum assured in whole dong
    #[arg(long, allow_negative_numbers = true)]
    pub sum_assured: Option<i64>,
}

/// Result of a `check` run
#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    pub reference_date: ReferenceDate,
    pub product: ProductId,
    pub age: Option<u32>,
    pub verdict: Result<EligibilityVerdict, EligibilityError>,
    pub sum_assured: Option<Result<(), EligibilityError>>,
}

impl CheckOutcome {
    /// True when the person is eligible and any requested amount is within the cap
    pub fn passed(&self) -> bool {
        matches!(self.verdict, Ok(EligibilityVerdict::Eligible))
            && self.sum_assured.as_ref().map_or(true, Result::is_ok)
    }
}

/// Applies command-line overrides on top of the loaded configuration
pub fn effective_config(cli: &Cli, config: EngineConfig) -> EngineConfig {
    match cli.reference_date {
        Some(date) => config.with_reference_date(date),
        None => config,
    }
}

/// Runs a check against `service`
pub fn check(service: &EligibilityService<'_>, args: &CheckArgs) -> CheckOutcome {
    let person = Person::new(args.birth_date);
    let age = service.age_of(&person).ok();
    let verdict = service.evaluate(&person, args.product, args.renewal);
    let sum_assured = args
        .sum_assured
        .map(|units| service.validate_sum_assured(args.product, Money::vnd(units)));

    tracing::debug!(
        product = %args.product,
        age = ?age,
        renewal = args.renewal,
        "check evaluated"
    );

    CheckOutcome {
        reference_date: service.reference_date(),
        product: args.product,
        age,
        verdict,
        sum_assured,
    }
}

/// Runs the parsed command, writing output to `out`
///
/// Returns whether the check passed; `catalog` always passes.
pub fn run<W: Write>(cli: &Cli, config: EngineConfig, out: &mut W) -> anyhow::Result<bool> {
    let service = EligibilityService::standard(effective_config(cli, config));

    match &cli.command {
        Command::Check(args) => {
            let outcome = check(&service, args);
            if cli.json {
                serde_json::to_writer_pretty(&mut *out, &outcome)?;
                writeln!(out)?;
            } else {
                write_outcome(out, &outcome)?;
            }
            Ok(outcome.passed())
        }
        Command::Catalog => {
            let rules: Vec<ProductRule> = service.catalog().rules().collect();
            if cli.json {
                serde_json::to_writer_pretty(&mut *out, &rules)?;
                writeln!(out)?;
            } else {
                write_catalog(out, service.catalog())?;
            }
            Ok(true)
        }
    }
}

fn write_outcome<W: Write>(out: &mut W, outcome: &CheckOutcome) -> std::io::Result<()> {
    writeln!(out, "Reference date: {}", outcome.reference_date)?;
    writeln!(out, "Product:        {} ({})", outcome.product, outcome.product.display_name())?;
    match outcome.age {
        Some(age) => writeln!(out, "Age:            {}", age)?,
        None => writeln!(out, "Age:            -")?,
    }
    match &outcome.verdict {
        Ok(verdict) => writeln!(out, "Verdict:        {}", verdict)?,
        Err(e) => writeln!(out, "Verdict:        error: {}", e)?,
    }
    match &outcome.sum_assured {
        Some(Ok(())) => writeln!(out, "Sum assured:    within cap")?,
        Some(Err(e)) => writeln!(out, "Sum assured:    {}", e)?,
        None => {}
    }
    Ok(())
}

fn write_catalog<W: Write>(out: &mut W, catalog: &ProductCatalog) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<18} {:<6} {:>6} {:>8} {:>18}",
        "Product", "Kind", "Entry", "Renewal", "Cap"
    )?;
    for rule in catalog.rules() {
        let renewal = rule
            .renewal_age_max
            .map_or_else(|| "-".to_string(), |age| age.to_string());
        let cap = rule
            .sum_assured_max
            .map_or_else(|| "-".to_string(), |cap| cap.to_string());
        writeln!(
            out,
            "{:<18} {:<6} {:>6} {:>8} {:>18}",
            rule.product_id.key(),
            format!("{:?}", rule.kind()),
            rule.entry_age_max,
            renewal,
            cap
        )?;
    }
    Ok(())
}
