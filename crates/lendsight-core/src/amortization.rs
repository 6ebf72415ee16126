//! Level-payment amortization.
//!
//! Rates are annual percentages (12.5 means 12.5%), compounded monthly. Money
//! results are rounded to cents; balances are clamped at zero.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LendSightError;
use crate::types::{Money, Percent};
use crate::LendSightResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);
const CENTS_DP: u32 = 2;

/// One period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

/// Monthly periodic rate for an annual percentage rate.
pub fn monthly_rate(annual_rate_pct: Percent) -> Decimal {
    annual_rate_pct / PERCENT / MONTHS_PER_YEAR
}

/// Level monthly payment that retires `principal` over `term_months`.
pub fn monthly_payment(
    principal: Money,
    annual_rate_pct: Percent,
    term_months: u32,
) -> LendSightResult<Money> {
    validate_loan(principal, annual_rate_pct, term_months)?;

    if annual_rate_pct.is_zero() {
        return Ok((principal / Decimal::from(term_months)).round_dp(CENTS_DP));
    }

    let r = monthly_rate(annual_rate_pct);
    let factor = growth_factor(r, term_months)?;
    let annuity = factor - Decimal::ONE;
    if annuity.is_zero() {
        return Err(LendSightError::Overflow {
            context: "payment annuity factor underflowed to zero".into(),
        });
    }

    let accrued = checked(principal.checked_mul(r), "principal * r")?;
    let accrued = checked(accrued.checked_mul(factor), "principal * r * (1 + r)^n")?;
    let payment = checked(accrued.checked_div(annuity), "payment annuity division")?;
    Ok(payment.round_dp(CENTS_DP))
}

/// Remaining principal after `payments_made` level payments.
///
/// Future value of the principal minus future value of the payments made. A loan
/// with every payment made is exactly zero; rounding drift near the end of the
/// term never produces a negative balance.
pub fn outstanding_balance(
    principal: Money,
    annual_rate_pct: Percent,
    term_months: u32,
    payments_made: u32,
) -> LendSightResult<Money> {
    validate_loan(principal, annual_rate_pct, term_months)?;

    if payments_made >= term_months {
        return Ok(Decimal::ZERO);
    }

    let balance = if annual_rate_pct.is_zero() {
        principal - principal / Decimal::from(term_months) * Decimal::from(payments_made)
    } else {
        let r = monthly_rate(annual_rate_pct);
        let payment = monthly_payment(principal, annual_rate_pct, term_months)?;
        let factor = growth_factor(r, payments_made)?;
        let grown = checked(principal.checked_mul(factor), "principal * (1 + r)^k")?;
        let annuity = checked((factor - Decimal::ONE).checked_div(r), "((1 + r)^k - 1) / r")?;
        let repaid = checked(payment.checked_mul(annuity), "payment annuity value")?;
        checked(grown.checked_sub(repaid), "outstanding balance")?
    };

    Ok(balance.max(Decimal::ZERO).round_dp(CENTS_DP))
}

/// Period-by-period schedule. The balance column matches [`outstanding_balance`]
/// at every period; the final period absorbs rounding so the loan closes at zero.
pub fn amortization_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    term_months: u32,
) -> LendSightResult<Vec<AmortizationRow>> {
    validate_loan(principal, annual_rate_pct, term_months)?;

    let r = monthly_rate(annual_rate_pct);
    let mut rows = Vec::with_capacity(term_months as usize);
    let mut opening = principal;

    for period in 1..=term_months {
        let closing = outstanding_balance(principal, annual_rate_pct, term_months, period)?;
        let interest = checked(opening.checked_mul(r), "period interest")?.round_dp(CENTS_DP);
        let principal_paid = opening - closing;
        rows.push(AmortizationRow {
            period,
            payment: interest + principal_paid,
            interest,
            principal: principal_paid,
            balance: closing,
        });
        opening = closing;
    }

    Ok(rows)
}

fn checked(value: Option<Decimal>, context: &str) -> LendSightResult<Decimal> {
    value.ok_or_else(|| LendSightError::Overflow {
        context: context.into(),
    })
}

fn growth_factor(r: Decimal, periods: u32) -> LendSightResult<Decimal> {
    (Decimal::ONE + r)
        .checked_powi(i64::from(periods))
        .ok_or_else(|| LendSightError::Overflow {
            context: format!("(1 + {r})^{periods}"),
        })
}

fn validate_loan(principal: Money, annual_rate_pct: Percent, term_months: u32) -> LendSightResult<()> {
    if term_months == 0 {
        return Err(LendSightError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    if principal < Decimal::ZERO {
        return Err(LendSightError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(LendSightError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Rate cannot be negative".into(),
        });
    }
    Ok(())
}
