use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

use lendsight_core::analytics::generate_analytics_with_config;
use lendsight_core::config::DEFAULT_SEED;
use lendsight_core::types::with_metadata;
use lendsight_core::AnalyticsBundle;

use super::clients::format_money;

use crate::input;

/// Arguments for the dashboard analytics bundle
#[derive(Args)]
pub struct AnalyticsArgs {
    /// Random seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Generation date (YYYY-MM-DD); the timestamp is midnight of that day. Defaults to now
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Path to a JSON or YAML generator config
    #[arg(long)]
    pub config: Option<String>,

    /// Also write the bundle to this JSON file
    #[arg(long)]
    pub json_file: Option<String>,
}

pub fn run_analytics(args: AnalyticsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = input::file::read_config(args.config.as_deref())?;
    let generated_at = super::resolve_generated_at(args.as_of);

    let start = Instant::now();
    let bundle = generate_analytics_with_config(&config, args.seed, generated_at)?;
    let elapsed = start.elapsed().as_micros() as u64;

    if let Some(ref path) = args.json_file {
        let text = serde_json::to_string_pretty(&bundle)?;
        fs::write(path, text).map_err(|e| format!("Failed to write '{}': {}", path, e))?;
        eprintln!("{} analytics to {}", "saved".green().bold(), path);
    }

    write_bundle_summary(&mut io::stderr().lock(), &bundle)?;

    let output = with_metadata(
        "Synthetic dashboard analytics drawn from fixed ranges, independent of client records",
        &json!({ "generated_at": generated_at }),
        Vec::new(),
        elapsed,
        Some(args.seed),
        bundle,
    );
    Ok(serde_json::to_value(output)?)
}

/// Headline figures of a bundle, printed after `analytics` and `export` runs.
pub fn write_bundle_summary<W: Write>(out: &mut W, bundle: &AnalyticsBundle) -> io::Result<()> {
    let overview = &bundle.portfolio_overview;
    writeln!(out, "{}", "Portfolio overview".bold())?;
    writeln!(
        out,
        "  Active Loan Balance: {}",
        format_money(overview.active_loan_balance.value)
    )?;
    writeln!(out, "  12-Month Rolling:    {}", format_money(overview.rolling_12m_amount))?;
    writeln!(out, "  Average Loan Size:   {}", format_money(overview.average_loan_size))?;
    writeln!(
        out,
        "  Active Clients:      {}/{}",
        overview.active_clients, overview.total_clients
    )?;
    writeln!(out, "  Active Loans:        {}", overview.active_loans)?;
    writeln!(out, "Recent transactions: {}", bundle.recent_transactions.len())?;
    writeln!(out, "High-risk profiles:  {}", bundle.high_risk_profiles.len())?;
    writeln!(out, "{}", "Property types".bold())?;
    for p in &bundle.property_analytics.distribution {
        writeln!(
            out,
            "  {}: {}%",
            p.property_type,
            (p.share * Decimal::ONE_HUNDRED).round_dp(0)
        )?;
    }
    writeln!(out, "Monthly trends: {} months", bundle.monthly_trends.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_file_matches_envelope_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lendsight_data.json");
        let value = run_analytics(AnalyticsArgs {
            seed: 42,
            as_of: NaiveDate::from_ymd_opt(2025, 9, 27),
            config: None,
            json_file: Some(path.to_string_lossy().into_owned()),
        })
        .unwrap();

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, value["result"]);
        assert_eq!(saved["generated_at"], "2025-09-27T00:00:00");
        assert_eq!(saved["recent_transactions"].as_array().unwrap().len(), 15);
    }

    #[test]
    fn test_bundle_summary_lines() {
        colored::control::set_override(false);
        let generated_at = NaiveDate::from_ymd_opt(2025, 9, 27)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let bundle = lendsight_core::generate_analytics(42, generated_at).unwrap();

        let mut buf = Vec::new();
        write_bundle_summary(&mut buf, &bundle).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Active Clients:      50/60"));
        assert!(text.contains("Active Loans:        86"));
        assert!(text.contains("Recent transactions: 15"));
        assert!(text.contains("High-risk profiles:  7"));
        assert!(text.contains("  Apartment Block: 24%"));
        assert!(text.contains("Monthly trends: 12 months"));
        let balance = format_money(bundle.portfolio_overview.active_loan_balance.value);
        assert!(text.contains(&balance));
    }
}
