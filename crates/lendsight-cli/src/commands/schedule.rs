use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use lendsight_core::amortization::{amortization_schedule, monthly_payment};
use lendsight_core::types::with_metadata;

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Decimal,

    /// Term in months
    #[arg(long)]
    pub term: u32,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let payment = monthly_payment(args.principal, args.rate, args.term)?;
    let rows = amortization_schedule(args.principal, args.rate, args.term)?;
    let elapsed = start.elapsed().as_micros() as u64;

    let output = with_metadata(
        "Level-payment annuity amortization, balances rounded to cents",
        &json!({
            "principal": args.principal,
            "annual_rate_pct": args.rate,
            "term_months": args.term,
            "monthly_payment": payment,
        }),
        Vec::new(),
        elapsed,
        None,
        rows,
    );
    Ok(serde_json::to_value(output)?)
}
