//! `ccast` — command-line boundary for the CarbonCast engine.
//!
//! The binary owns everything the engine refuses to: loading the catalog at
//! startup (and aborting the process when it fails validation), validating
//! request volumes before the core sees them, rendering typed errors for
//! humans, and shaping results as JSON on stdout. Logging goes to stderr so
//! output stays pipeable.

use std::process::ExitCode;

use serde_json::json;
use tracing::Level;

use ccast_catalog::Catalog;
use ccast_core::{analysis, capture, credits, gamification, policy, storage, utilization};
use ccast_error::CcastError;
use ccast_types::{ActivityLedger, AnalysisRequest, IndustryId, MarketId, RegionId};

const USAGE: &str = "\
ccast — CCUS planning decision support

USAGE:
    ccast <COMMAND> [OPTIONS] [--catalog PATH] [--pretty] [--verbose]

COMMANDS:
    analyze      --industry KEY --emissions TONNES [--region NAME] [--market KEY]
                 run the comprehensive pipeline
    capture      --industry KEY --emissions TONNES
    storage      --co2 TONNES [--region NAME]
    utilization  --co2 TONNES
    credits      --co2 TONNES [--market KEY]
    policy       --capture TONNES [--start-year YEAR]
    engagement   --offset TONNES [--interactions N] [--actions N]
    industries   list supported industries and capture efficiencies
    overview     [--top N] national storage capacity overview
";

/// Default region count shown by `overview`.
const DEFAULT_OVERVIEW_TOP: usize = 5;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let level = if has_switch(&args, "--verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => failure.report(),
    }
}

/// How a failed invocation should be reported and what the process should
/// exit with.
#[derive(Debug)]
enum Failure {
    /// Bad command line: usage text, exit 2.
    Usage(String),
    /// Engine rejected the request (client error): message, exit 2.
    Request(CcastError),
    /// Catalog or I/O problem: message, exit 1.
    Fatal(CcastError),
}

impl Failure {
    fn report(self) -> ExitCode {
        match self {
            Self::Usage(message) => {
                eprintln!("ccast: {message}");
                eprintln!("{USAGE}");
                ExitCode::from(2)
            }
            Self::Request(err) => {
                eprintln!("ccast: {err}");
                if let CcastError::UnknownIndustry { supported, .. } = &err {
                    eprintln!("supported industries: {}", supported.join(", "));
                }
                ExitCode::from(2)
            }
            Self::Fatal(err) => {
                eprintln!("ccast: {err}");
                ExitCode::FAILURE
            }
        }
    }
}

impl From<CcastError> for Failure {
    fn from(err: CcastError) -> Self {
        if err.is_client_error() {
            Self::Request(err)
        } else {
            Self::Fatal(err)
        }
    }
}

fn run(args: &[String]) -> Result<(), Failure> {
    let command = match args.first() {
        Some(first) if !first.starts_with("--") => first.clone(),
        _ => return Err(Failure::Usage("missing command".to_owned())),
    };

    // Catalog load is the one process-wide startup step: abort before any
    // request logic when it fails.
    let catalog = match flag_value(args, "--catalog") {
        Some(path) => Catalog::from_path(path).map_err(Failure::Fatal)?,
        None => Catalog::builtin().map_err(Failure::Fatal)?,
    };
    let pretty = has_switch(args, "--pretty");

    match command.as_str() {
        "analyze" => {
            let request = AnalysisRequest {
                industry: IndustryId::new(required(args, "--industry")?),
                annual_emissions_tonnes: positive_amount(args, "--emissions")?,
                home_region: flag_value(args, "--region").map(RegionId::new),
                credit_market: flag_value(args, "--market").map(MarketId::new),
            };
            let result = analysis::run(&catalog, &request).map_err(Failure::from)?;
            emit(&result, pretty)
        }
        "capture" => {
            let industry = IndustryId::new(required(args, "--industry")?);
            let emissions = positive_amount(args, "--emissions")?;
            let estimate =
                capture::estimate(&catalog, &industry, emissions).map_err(Failure::from)?;
            emit(&estimate, pretty)
        }
        "storage" => {
            let co2 = positive_amount(args, "--co2")?;
            let region = flag_value(args, "--region").map(RegionId::new);
            let ranked =
                storage::rank(&catalog, co2, region.as_ref()).map_err(Failure::from)?;
            emit(&ranked, pretty)
        }
        "utilization" => {
            let co2 = positive_amount(args, "--co2")?;
            let ranked = utilization::rank(&catalog, co2).map_err(Failure::from)?;
            emit(&ranked, pretty)
        }
        "credits" => {
            let co2 = positive_amount(args, "--co2")?;
            let market = flag_value(args, "--market").map(MarketId::new);
            let valuation =
                credits::value(&catalog, co2, market.as_ref()).map_err(Failure::from)?;
            emit(&valuation, pretty)
        }
        "policy" => {
            let tonnes = non_negative_amount(args, "--capture")?;
            let start_year = match flag_value(args, "--start-year") {
                Some(raw) => Some(raw.parse::<u16>().map_err(|_| {
                    Failure::Usage(format!("--start-year: `{raw}` is not a year"))
                })?),
                None => None,
            };
            let assessment =
                policy::assess(&catalog, tonnes, start_year).map_err(Failure::from)?;
            emit(&assessment, pretty)
        }
        "engagement" => {
            let ledger = ActivityLedger {
                co2_offset_tonnes: non_negative_amount(args, "--offset")?,
                content_interactions: counter(args, "--interactions")?,
                actions_taken: counter(args, "--actions")?,
            };
            let report = gamification::score(&catalog, &ledger).map_err(Failure::from)?;
            emit(&report, pretty)
        }
        "industries" => {
            let listing: Vec<serde_json::Value> = catalog
                .industries
                .iter()
                .map(|(id, profile)| {
                    json!({
                        "industry": id,
                        "capture_efficiency_percent": profile.capture_efficiency * 100.0,
                        "description": profile.description,
                    })
                })
                .collect();
            emit(&listing, pretty)
        }
        "overview" => {
            let top = match flag_value(args, "--top") {
                Some(raw) => raw.parse::<usize>().map_err(|_| {
                    Failure::Usage(format!("--top: `{raw}` is not a count"))
                })?,
                None => DEFAULT_OVERVIEW_TOP,
            };
            emit(&storage::overview(&catalog, top), pretty)
        }
        other => Err(Failure::Usage(format!("unknown command `{other}`"))),
    }
}

fn emit<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), Failure> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| Failure::Fatal(CcastError::from(e)))?;
    println!("{rendered}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Flag parsing
// ---------------------------------------------------------------------------

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

fn has_switch(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn required<'a>(args: &'a [String], name: &str) -> Result<&'a str, Failure> {
    flag_value(args, name).ok_or_else(|| Failure::Usage(format!("{name} is required")))
}

fn parse_amount(args: &[String], name: &str) -> Result<f64, Failure> {
    let raw = required(args, name)?;
    raw.parse::<f64>()
        .map_err(|_| Failure::Usage(format!("{name}: `{raw}` is not a number")))
}

/// Boundary validation: volumes must be positive before the engine runs.
fn positive_amount(args: &[String], name: &str) -> Result<f64, Failure> {
    let value = parse_amount(args, name)?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Failure::Usage(format!("{name} must be a positive number")))
    }
}

fn non_negative_amount(args: &[String], name: &str) -> Result<f64, Failure> {
    let value = parse_amount(args, name)?;
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Failure::Usage(format!("{name} must be non-negative")))
    }
}

fn counter(args: &[String], name: &str) -> Result<u64, Failure> {
    match flag_value(args, name) {
        None => Ok(0),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| Failure::Usage(format!("{name}: `{raw}` is not a count"))),
    }
}
