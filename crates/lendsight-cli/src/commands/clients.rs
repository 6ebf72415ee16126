use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use lendsight_core::config::{DEFAULT_CLIENT_COUNT, DEFAULT_SEED};
use lendsight_core::portfolio::{generate_portfolio_with_config, summarize_portfolio};
use lendsight_core::types::with_metadata;
use lendsight_core::LoanRecord;

use crate::input;

/// Arguments for client portfolio generation
#[derive(Args)]
pub struct ClientsArgs {
    /// Number of client records to generate
    #[arg(long, default_value_t = DEFAULT_CLIENT_COUNT)]
    pub count: usize,

    /// Random seed; the same seed and date reproduce the same records
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Generation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Path to a JSON or YAML generator config
    #[arg(long)]
    pub config: Option<String>,

    /// Also write the records to this CSV file
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run_clients(args: ClientsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = input::file::read_config(args.config.as_deref())?;
    let as_of = super::resolve_as_of(args.as_of);

    let start = Instant::now();
    let records = generate_portfolio_with_config(&config, args.seed, args.count, as_of)?;
    let elapsed = start.elapsed().as_micros() as u64;

    if let Some(ref path) = args.out {
        write_clients_csv(path, &records)?;
        eprintln!("{} {} clients to {}", "exported".green().bold(), records.len(), path);
    }

    let summary = summarize_portfolio(&records);
    eprintln!(
        "Total Active Loan Balance: {}",
        format_money(summary.active_loan_balance)
    );

    let output = with_metadata(
        "Seeded synthetic loan records with level-payment amortization",
        &json!({
            "client_count": args.count,
            "as_of": as_of,
        }),
        Vec::new(),
        elapsed,
        Some(args.seed),
        records,
    );
    Ok(serde_json::to_value(output)?)
}

/// Write records with one header row in export column order.
pub fn write_clients_csv(path: &str, records: &[LoanRecord]) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to create '{}': {}", path, e))?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// `$1,234,567.89`
pub fn format_money(amount: Decimal) -> String {
    let text = format!("{:.2}", amount.round_dp(2).abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}
