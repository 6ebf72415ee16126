use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::LendSightError;
use crate::identity;
use crate::portfolio::record::{LOAN_AMOUNT_MAX, LOAN_AMOUNT_MIN, LTV_MAX, LTV_MIN};
use crate::rng::GenerationContext;
use crate::types::{LoanStatus, Money, PropertyType};
use crate::LendSightResult;

pub const RECENT_TRANSACTION_COUNT: usize = 15;
/// Transactions are dated at most this many days before the generation date.
pub const RECENT_WINDOW_DAYS: u64 = 180;
pub const LATE_PAYMENT_RATE: Decimal = dec!(0.10);

/// A row of the dashboard's recent-transactions panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    #[serde(rename = "#")]
    pub rank: u32,
    pub loan_id: String,
    pub client_name: String,
    pub property_type: PropertyType,
    pub ltv_percent: u32,
    pub disbursed_date: NaiveDate,
    pub loan_amount: Money,
    pub status: LoanStatus,
}

/// `count` transactions from the last 180 days, newest first, ranked from 1.
pub fn recent_transactions(
    ctx: &mut GenerationContext,
    config: &GeneratorConfig,
    count: usize,
    as_of: NaiveDate,
) -> LendSightResult<Vec<RecentTransaction>> {
    let window_start = as_of
        .checked_sub_days(Days::new(RECENT_WINDOW_DAYS))
        .ok_or_else(|| LendSightError::InvalidInput {
            field: "as_of".into(),
            reason: format!("{as_of} leaves no room for the transaction window"),
        })?;

    let mut transactions = Vec::with_capacity(count);
    for _ in 0..count {
        let days_in = ctx.uniform_int(0, RECENT_WINDOW_DAYS as i64) as u64;
        let disbursed_date = window_start
            .checked_add_days(Days::new(days_in))
            .unwrap_or(as_of);
        let status = if ctx.chance(LATE_PAYMENT_RATE) {
            LoanStatus::LatePayment
        } else {
            LoanStatus::Active
        };
        let loan_id = format!("L{:03}", ctx.uniform_int(1, 99));
        let client_name = identity::client_name(ctx, &config.names);
        let property_type = *ctx.weighted(&config.property_types);
        let ltv_percent = ctx.uniform_int(i64::from(LTV_MIN), i64::from(LTV_MAX)) as u32;
        let loan_amount = Decimal::from(ctx.uniform_int(LOAN_AMOUNT_MIN, LOAN_AMOUNT_MAX));

        transactions.push(RecentTransaction {
            rank: 0,
            loan_id,
            client_name,
            property_type,
            ltv_percent,
            disbursed_date,
            loan_amount,
            status,
        });
    }

    // Stable sort keeps draw order among same-day transactions.
    transactions.sort_by(|a, b| b.disbursed_date.cmp(&a.disbursed_date));
    for (i, t) in transactions.iter_mut().enumerate() {
        t.rank = i as u32 + 1;
    }
    Ok(transactions)
}
