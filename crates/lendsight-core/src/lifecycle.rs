//! Lifecycle status resolution.
//!
//! Picks a status for a loan and the payment count that status implies, then
//! prices the remaining balance. Paid-off loans always close at zero and no loan
//! is credited with more payments than its term.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization;
use crate::rng::GenerationContext;
use crate::sampling::DistributionTable;
use crate::types::{LoanStatus, Money, Percent, TermMonths};
use crate::LendSightResult;

/// Inclusive range of months a late borrower is behind schedule.
pub const MISSED_MONTHS_MIN: i64 = 1;
pub const MISSED_MONTHS_MAX: i64 = 3;

/// Pricing terms of a loan, fixed before its lifecycle is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub term: TermMonths,
}

/// Consistent (status, payments, balance) triple for one loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifecycleState {
    pub status: LoanStatus,
    pub months_elapsed: u32,
    pub payments_made: u32,
    pub outstanding_balance: Money,
}

/// Whole calendar months from `disbursed` to `as_of`, never negative.
///
/// Only year and month count, so a loan disbursed on the 31st is one month old on
/// the 1st of the next month.
pub fn months_elapsed(disbursed: NaiveDate, as_of: NaiveDate) -> u32 {
    let months = (as_of.year() - disbursed.year()) * 12 + as_of.month() as i32
        - disbursed.month() as i32;
    months.max(0) as u32
}

/// Draw a status from `statuses` and derive the payment count and balance.
///
/// Consumes one status draw, plus one missed-months draw for late loans.
pub fn resolve_lifecycle(
    ctx: &mut GenerationContext,
    statuses: &DistributionTable<LoanStatus>,
    terms: &LoanTerms,
    disbursed: NaiveDate,
    as_of: NaiveDate,
) -> LendSightResult<LifecycleState> {
    let elapsed = months_elapsed(disbursed, as_of);
    let status = *ctx.weighted(statuses);
    let payments_made = payments_for_status(ctx, status, elapsed, terms.term);

    let outstanding_balance = if status == LoanStatus::PaidOff {
        Decimal::ZERO
    } else {
        amortization::outstanding_balance(
            terms.principal,
            terms.annual_rate_pct,
            terms.term.months(),
            payments_made,
        )?
    };

    Ok(LifecycleState {
        status,
        months_elapsed: elapsed,
        payments_made,
        outstanding_balance,
    })
}

fn payments_for_status(
    ctx: &mut GenerationContext,
    status: LoanStatus,
    months_elapsed: u32,
    term: TermMonths,
) -> u32 {
    let term = term.months();
    match status {
        LoanStatus::PaidOff => term,
        LoanStatus::LatePayment => {
            let missed = ctx.uniform_int(MISSED_MONTHS_MIN, MISSED_MONTHS_MAX) as u32;
            // A late loan still owes at least one instalment.
            months_elapsed.saturating_sub(missed).min(term - 1)
        }
        LoanStatus::Active => months_elapsed.min(term),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn terms(months: u32) -> LoanTerms {
        LoanTerms {
            principal: dec!(50_000_000),
            annual_rate_pct: dec!(10.25),
            term: TermMonths::try_from(months).unwrap(),
        }
    }

    fn only(status: LoanStatus) -> DistributionTable<LoanStatus> {
        DistributionTable::weighted(vec![(status, Decimal::ONE)])
    }

    #[test]
    fn test_months_elapsed_counts_calendar_months() {
        assert_eq!(months_elapsed(date(2024, 1, 31), date(2024, 2, 1)), 1);
        assert_eq!(months_elapsed(date(2023, 11, 15), date(2025, 2, 1)), 15);
        assert_eq!(months_elapsed(date(2025, 3, 1), date(2025, 3, 31)), 0);
    }

    #[test]
    fn test_months_elapsed_never_negative() {
        assert_eq!(months_elapsed(date(2026, 1, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_paid_off_closes_at_zero() {
        let mut ctx = GenerationContext::new(1);
        let state = resolve_lifecycle(
            &mut ctx,
            &only(LoanStatus::PaidOff),
            &terms(60),
            date(2025, 1, 10),
            date(2025, 6, 1),
        )
        .unwrap();
        assert_eq!(state.payments_made, 60);
        assert_eq!(state.outstanding_balance, Decimal::ZERO);
    }

    #[test]
    fn test_active_is_on_schedule() {
        let mut ctx = GenerationContext::new(1);
        let state = resolve_lifecycle(
            &mut ctx,
            &only(LoanStatus::Active),
            &terms(36),
            date(2024, 6, 20),
            date(2025, 6, 1),
        )
        .unwrap();
        assert_eq!(state.months_elapsed, 12);
        assert_eq!(state.payments_made, 12);
        let expected = amortization::outstanding_balance(dec!(50_000_000), dec!(10.25), 36, 12).unwrap();
        assert_eq!(state.outstanding_balance, expected);
    }

    #[test]
    fn test_active_capped_at_term() {
        let mut ctx = GenerationContext::new(1);
        let state = resolve_lifecycle(
            &mut ctx,
            &only(LoanStatus::Active),
            &terms(36),
            date(2020, 1, 1),
            date(2025, 1, 1),
        )
        .unwrap();
        assert_eq!(state.payments_made, 36);
        assert_eq!(state.outstanding_balance, Decimal::ZERO);
    }

    #[test]
    fn test_late_is_behind_schedule() {
        for seed in 0..200 {
            let mut ctx = GenerationContext::new(seed);
            let state = resolve_lifecycle(
                &mut ctx,
                &only(LoanStatus::LatePayment),
                &terms(48),
                date(2024, 2, 5),
                date(2025, 8, 1),
            )
            .unwrap();
            let behind = state.months_elapsed - state.payments_made;
            assert!((1..=3).contains(&behind), "behind={behind}");
            assert!(state.outstanding_balance > Decimal::ZERO);
        }
    }

    #[test]
    fn test_late_without_history_makes_no_payments() {
        let mut ctx = GenerationContext::new(3);
        let state = resolve_lifecycle(
            &mut ctx,
            &only(LoanStatus::LatePayment),
            &terms(48),
            date(2025, 8, 2),
            date(2025, 8, 30),
        )
        .unwrap();
        assert_eq!(state.payments_made, 0);
        assert_eq!(state.outstanding_balance, dec!(50_000_000));
    }

    #[test]
    fn test_late_never_reaches_term() {
        let mut ctx = GenerationContext::new(9);
        let state = resolve_lifecycle(
            &mut ctx,
            &only(LoanStatus::LatePayment),
            &terms(36),
            date(2015, 1, 1),
            date(2025, 1, 1),
        )
        .unwrap();
        assert_eq!(state.payments_made, 35);
        assert!(state.outstanding_balance > Decimal::ZERO);
    }
}
