//! report-cli: screen financial reports from the command line.
//!
//! Usage:
//!   report-cli import <fixture.json>
//!   report-cli report <asset-id> [--locale es-MX] [--as-of 2026-10-19]
//!   report-cli maintenance <request.json>
//!   report-cli overview
//!
//! Every subcommand accepts `--db <url>` to override DATABASE_URL.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use cost_calculator::CostCalculator;
use report_assembler::ReportLocale;
use report_orchestrator::{JsonFileRenderer, ReportConfig, ReportService};
use screen_store::ScreenDb;
use std::path::Path;
use std::sync::Arc;

mod fixture;

use fixture::{load_request, Fixture};

const USAGE: &str = "usage: report-cli <import <fixture.json> | report <asset-id> | maintenance <request.json> | overview> [--db <url>] [--locale <tag>] [--as-of <YYYY-MM-DD>]";

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so stdout stays machine-readable
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

/// Positional arguments, skipping flags and their values
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let mut config = ReportConfig::from_env();
    if let Some(url) = flag_value(&args, "--db") {
        config.database_url = url.to_string();
    }
    if let Some(tag) = flag_value(&args, "--locale") {
        config.locale = ReportLocale::parse(tag);
    }

    let positional = positionals(&args);
    let Some(&command) = positional.first() else {
        bail!(USAGE);
    };

    let db = Arc::new(
        ScreenDb::new(&config.database_url)
            .await
            .with_context(|| format!("failed to open database {}", config.database_url))?,
    );
    let rates = config.load_rate_table()?;
    let renderer = Arc::new(JsonFileRenderer::new(config.output_dir.clone()));

    let mut service = ReportService::from_store(db.clone(), renderer)
        .with_options(config.report_options())
        .with_calculator(CostCalculator::new(rates));
    if let Some(raw) = flag_value(&args, "--as-of") {
        let as_of = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid --as-of date: {}", raw))?;
        service = service.with_reference_date(as_of);
    }

    match (command, positional.get(1)) {
        ("import", Some(path)) => {
            let fixture = Fixture::load(Path::new(path)).await?;
            for asset in &fixture.assets {
                db.upsert_asset(asset).await?;
            }
            for record in &fixture.expenses {
                db.insert_expense_record(record).await?;
            }
            let mut recorded = 0;
            for request in fixture.maintenance {
                let asset_id = request.asset_id.clone();
                match service.record_maintenance(request).await {
                    Ok(_) => recorded += 1,
                    Err(e) => tracing::warn!("Skipping maintenance for {}: {}", asset_id, e),
                }
            }
            tracing::info!(
                "Imported {} assets, {} expense records, {} maintenance events",
                fixture.assets.len(),
                fixture.expenses.len(),
                recorded
            );
        }
        ("report", Some(asset_id)) => match service.generate_report(asset_id).await {
            Ok(handle) => print_json(&handle)?,
            Err(e) if e.is_not_found() => {
                eprintln!("Report unavailable: {}", e);
                std::process::exit(2);
            }
            Err(e) => return Err(e).context("report generation failed"),
        },
        ("maintenance", Some(path)) => {
            let request = load_request(Path::new(path)).await?;
            let outcome = service
                .record_maintenance(request)
                .await
                .context("failed to record maintenance")?;
            print_json(&outcome)?;
        }
        ("overview", _) => {
            let overview = service.fleet_overview().await.context("failed to build overview")?;
            print_json(&overview)?;
        }
        _ => bail!(USAGE),
    }

    Ok(())
}
