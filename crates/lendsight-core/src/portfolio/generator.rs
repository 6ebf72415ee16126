//! Client/loan record generation.
//!
//! One [`GenerationContext`] drives the whole run and every record consumes its
//! draws in a fixed order, so a seed and a generation date pin the output
//! byte for byte.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::amortization;
use crate::config::GeneratorConfig;
use crate::error::LendSightError;
use crate::identity;
use crate::lifecycle::{self, LoanTerms};
use crate::rng::GenerationContext;
use crate::types::{TermMonths, ALLOWED_TERMS};
use crate::LendSightResult;

use super::record::{
    padded_id, LoanRecord, DISBURSEMENT_WINDOW_DAYS, INTEREST_RATE_MAX, INTEREST_RATE_MIN,
    LOAN_AMOUNT_MAX, LOAN_AMOUNT_MIN, LTV_MAX, LTV_MIN,
};

/// Generate `client_count` records with the default tables, sorted by `client_id`.
pub fn generate_portfolio(
    seed: u64,
    client_count: usize,
    as_of: NaiveDate,
) -> LendSightResult<Vec<LoanRecord>> {
    generate_portfolio_with_config(&GeneratorConfig::default(), seed, client_count, as_of)
}

/// Generate `client_count` records from `config`, sorted by `client_id`.
pub fn generate_portfolio_with_config(
    config: &GeneratorConfig,
    seed: u64,
    client_count: usize,
    as_of: NaiveDate,
) -> LendSightResult<Vec<LoanRecord>> {
    config.validate()?;

    let window_start = as_of
        .checked_sub_days(Days::new(DISBURSEMENT_WINDOW_DAYS))
        .ok_or_else(|| LendSightError::InvalidInput {
            field: "as_of".into(),
            reason: format!("{as_of} leaves no room for the disbursement window"),
        })?;

    tracing::debug!(seed, client_count, %as_of, "generating loan portfolio");

    let mut ctx = GenerationContext::new(seed);
    let mut records = Vec::with_capacity(client_count);
    for index in 1..=client_count {
        let record = generate_record(&mut ctx, config, index, client_count, window_start, as_of)?;
        record.check_invariants(as_of)?;
        tracing::trace!(
            client_id = %record.client_id,
            status = %record.status,
            payments_made = record.payments_made,
            "generated loan record"
        );
        records.push(record);
    }

    records.sort_by(|a, b| a.client_id.cmp(&b.client_id));
    Ok(records)
}

fn generate_record(
    ctx: &mut GenerationContext,
    config: &GeneratorConfig,
    index: usize,
    client_count: usize,
    window_start: NaiveDate,
    as_of: NaiveDate,
) -> LendSightResult<LoanRecord> {
    let client_name = identity::client_name(ctx, &config.names);

    let days_in = ctx.uniform_int(0, DISBURSEMENT_WINDOW_DAYS as i64) as u64;
    let disbursed_date = window_start
        .checked_add_days(Days::new(days_in))
        .unwrap_or(as_of);

    let terms = LoanTerms {
        principal: Decimal::from(ctx.uniform_int(LOAN_AMOUNT_MIN, LOAN_AMOUNT_MAX)),
        annual_rate_pct: ctx.uniform(INTEREST_RATE_MIN, INTEREST_RATE_MAX).round_dp(2),
        term: TermMonths::try_from(*ctx.choose(&ALLOWED_TERMS))?,
    };
    let monthly_payment =
        amortization::monthly_payment(terms.principal, terms.annual_rate_pct, terms.term.months())?;

    let state = lifecycle::resolve_lifecycle(ctx, &config.statuses, &terms, disbursed_date, as_of)?;

    let property_type = *ctx.weighted(&config.property_types);
    let region = *ctx.weighted(&config.regions);
    let ltv_percent = ctx.uniform_int(i64::from(LTV_MIN), i64::from(LTV_MAX)) as u32;
    let email = identity::email(ctx, &config.names);

    Ok(LoanRecord {
        client_id: padded_id('C', index, client_count),
        client_name,
        loan_id: padded_id('L', index, client_count),
        property_type,
        region,
        ltv_percent,
        loan_amount: terms.principal,
        disbursed_date,
        interest_rate_percent: terms.annual_rate_pct,
        term_months: terms.term,
        monthly_payment,
        payments_made: state.payments_made,
        outstanding_balance: state.outstanding_balance,
        status: state.status,
        email,
    })
}
