use chrono::{Datelike, NaiveDate};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use lendsight_core::analytics::generate_analytics_with_config;
use lendsight_core::config::DEFAULT_SEED;
use lendsight_core::types::with_metadata;
use lendsight_core::AnalyticsBundle;

use crate::input;

type ExportResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Arguments for the CSV directory export
#[derive(Args)]
pub struct ExportArgs {
    /// Output directory, created if missing
    #[arg(long, default_value = "lendsight_csv")]
    pub dir: String,

    /// Random seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Generation date (YYYY-MM-DD), defaults to now
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Path to a JSON or YAML generator config
    #[arg(long)]
    pub config: Option<String>,
}

pub fn run_export(args: ExportArgs) -> ExportResult<Value> {
    let config = input::file::read_config(args.config.as_deref())?;
    let generated_at = super::resolve_generated_at(args.as_of);

    let start = Instant::now();
    let bundle = generate_analytics_with_config(&config, args.seed, generated_at)?;
    let files = export_bundle(Path::new(&args.dir), &bundle)?;
    super::analytics::write_bundle_summary(&mut io::stderr().lock(), &bundle)?;
    let elapsed = start.elapsed().as_micros() as u64;

    let output = with_metadata(
        "Analytics bundle exported as one CSV file per dashboard table",
        &json!({ "generated_at": generated_at }),
        Vec::new(),
        elapsed,
        Some(args.seed),
        json!({
            "directory": args.dir,
            "files": files,
        }),
    );
    Ok(serde_json::to_value(output)?)
}

/// Write every table of `bundle` into `dir` and return the written paths.
pub fn export_bundle(dir: &Path, bundle: &AnalyticsBundle) -> ExportResult<Vec<String>> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create '{}': {}", dir.display(), e))?;

    let mut written = Vec::with_capacity(9);
    let mut record = |path: PathBuf| {
        tracing::debug!(path = %path.display(), "exported");
        eprintln!("{} {}", "exported".green().bold(), path.display());
        written.push(path.display().to_string());
    };

    record(write_rows(dir, "recent_transactions.csv", &bundle.recent_transactions)?);
    record(write_rows(dir, "high_risk_profiles.csv", &bundle.high_risk_profiles)?);

    let overview = &bundle.portfolio_overview;
    record(write_pairs(
        dir,
        "portfolio_overview.csv",
        ["Metric", "Value"],
        vec![
            ("Active Loan Balance", overview.active_loan_balance.value.to_string()),
            ("YTD Change %", overview.active_loan_balance.ytd_change_percent.to_string()),
            ("12-Month Rolling Amount", overview.rolling_12m_amount.to_string()),
            ("Average Loan Size", overview.average_loan_size.to_string()),
            ("Active Clients", overview.active_clients.to_string()),
            ("Total Clients", overview.total_clients.to_string()),
            ("Active Loans", overview.active_loans.to_string()),
            ("Payment Status - Active %", overview.payment_status.active.to_string()),
            ("Payment Status - Late %", overview.payment_status.late_payment.to_string()),
            ("Payment Status - Paid Off %", overview.payment_status.paid_off.to_string()),
        ],
    )?);
    record(write_pairs(
        dir,
        "clients_by_region.csv",
        ["Region", "Percentage"],
        overview
            .clients_by_region
            .iter()
            .map(|r| (r.region.label(), r.share.to_string()))
            .collect(),
    )?);

    record(write_rows(dir, "monthly_trends.csv", &bundle.monthly_trends)?);

    let property = &bundle.property_analytics;
    record(write_pairs(
        dir,
        "property_type_distribution.csv",
        ["Property Type", "Percentage"],
        property
            .distribution
            .iter()
            .map(|p| (p.property_type.label(), p.share.to_string()))
            .collect(),
    )?);

    let year = bundle.generated_at.year();
    let path = dir.join("property_type_ytd_changes.csv");
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record([
        "Property Type".to_string(),
        "Change %".to_string(),
        format!("Loans {}", year - 1),
        format!("Loans {}", year),
    ])?;
    for change in &property.ytd_changes {
        wtr.write_record([
            change.property_type.label().to_string(),
            change.change_percent.map(|c| c.to_string()).unwrap_or_default(),
            change.loans_prior_year.to_string(),
            change.loans_current_year.to_string(),
        ])?;
    }
    wtr.flush()?;
    record(path);

    record(write_pairs(
        dir,
        "avg_loan_sizes_by_type.csv",
        ["Property Type", "Average Loan Size"],
        property
            .avg_loan_sizes
            .iter()
            .map(|p| (p.property_type.label(), p.average_loan_size.to_string()))
            .collect(),
    )?);

    let metrics = &property.avg_metrics;
    record(write_pairs(
        dir,
        "property_avg_metrics.csv",
        ["Metric", "Value"],
        vec![
            ("Average LTV", metrics.avg_ltv.to_string()),
            ("Average Interest Rate", metrics.avg_interest_rate.to_string()),
            ("Average Term (months)", metrics.avg_term_months.to_string()),
        ],
    )?);

    Ok(written)
}

/// One row per item, headers taken from the serialized field names.
fn write_rows<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> ExportResult<PathBuf> {
    let path = dir.join(name);
    let mut wtr = csv::Writer::from_path(&path)
        .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(path)
}

/// Two-column label/value table.
fn write_pairs(
    dir: &Path,
    name: &str,
    header: [&str; 2],
    pairs: Vec<(&str, String)>,
) -> ExportResult<PathBuf> {
    let path = dir.join(name);
    let mut wtr = csv::Writer::from_path(&path)
        .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;
    wtr.write_record(header)?;
    for (label, value) in pairs {
        wtr.write_record([label, value.as_str()])?;
    }
    wtr.flush()?;
    Ok(path)
}
