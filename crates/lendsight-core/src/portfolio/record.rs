use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LendSightError;
use crate::types::{LoanStatus, Money, Percent, PropertyType, Region, TermMonths};
use crate::LendSightResult;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

pub const LOAN_AMOUNT_MIN: i64 = 15_000_000;
pub const LOAN_AMOUNT_MAX: i64 = 300_000_000;
pub const INTEREST_RATE_MIN: Percent = dec!(8.5);
pub const INTEREST_RATE_MAX: Percent = dec!(15.5);
pub const LTV_MIN: u32 = 60;
pub const LTV_MAX: u32 = 90;
/// Loans are disbursed at most this many days before the generation date.
pub const DISBURSEMENT_WINDOW_DAYS: u64 = 730;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One client and their loan. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub client_id: String,
    pub client_name: String,
    pub loan_id: String,
    pub property_type: PropertyType,
    pub region: Region,
    pub ltv_percent: u32,
    pub loan_amount: Money,
    pub disbursed_date: NaiveDate,
    pub interest_rate_percent: Percent,
    pub term_months: TermMonths,
    pub monthly_payment: Money,
    pub payments_made: u32,
    pub outstanding_balance: Money,
    pub status: LoanStatus,
    pub email: String,
}

impl LoanRecord {
    /// Check the record is internally consistent as of `as_of`.
    pub fn check_invariants(&self, as_of: NaiveDate) -> LendSightResult<()> {
        let fail = |reason: String| {
            Err(LendSightError::InvariantViolation {
                record: self.client_id.clone(),
                reason,
            })
        };

        let amount_range = Decimal::from(LOAN_AMOUNT_MIN)..=Decimal::from(LOAN_AMOUNT_MAX);
        if !amount_range.contains(&self.loan_amount) || !self.loan_amount.fract().is_zero() {
            return fail(format!("loan_amount {} out of range", self.loan_amount));
        }
        if self.interest_rate_percent < INTEREST_RATE_MIN
            || self.interest_rate_percent > INTEREST_RATE_MAX
            || self.interest_rate_percent.round_dp(2) != self.interest_rate_percent
        {
            return fail(format!(
                "interest_rate_percent {} out of range",
                self.interest_rate_percent
            ));
        }
        if !(LTV_MIN..=LTV_MAX).contains(&self.ltv_percent) {
            return fail(format!("ltv_percent {} out of range", self.ltv_percent));
        }
        if self.disbursed_date > as_of
            || (as_of - self.disbursed_date).num_days() > DISBURSEMENT_WINDOW_DAYS as i64
        {
            return fail(format!(
                "disbursed_date {} outside the {DISBURSEMENT_WINDOW_DAYS}-day window",
                self.disbursed_date
            ));
        }
        if self.monthly_payment < Decimal::ZERO {
            return fail("monthly_payment is negative".into());
        }

        let term = self.term_months.months();
        if self.payments_made > term {
            return fail(format!("payments_made {} exceeds term {term}", self.payments_made));
        }
        if self.outstanding_balance < Decimal::ZERO {
            return fail("outstanding_balance is negative".into());
        }
        if self.outstanding_balance.is_zero() != (self.payments_made == term) {
            return fail(format!(
                "outstanding_balance {} inconsistent with {}/{term} payments",
                self.outstanding_balance, self.payments_made
            ));
        }
        if self.status == LoanStatus::PaidOff && self.payments_made != term {
            return fail("paid-off loan has payments outstanding".into());
        }
        Ok(())
    }
}

/// Zero-padded identifier such as `C0001`. The width grows past four digits only
/// when `count` needs it, so ids of one run always sort numerically.
pub fn padded_id(prefix: char, index: usize, count: usize) -> String {
    let width = count.to_string().len().max(4);
    format!("{prefix}{index:0width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn sample_record() -> LoanRecord {
        LoanRecord {
            client_id: "C0001".into(),
            client_name: "Klein Group".into(),
            loan_id: "L0001".into(),
            property_type: PropertyType::Warehouse,
            region: Region::Texas,
            ltv_percent: 74,
            loan_amount: dec!(15_000_000),
            disbursed_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            interest_rate_percent: dec!(8.5),
            term_months: TermMonths::try_from(36).unwrap(),
            monthly_payment: dec!(473_513.06),
            payments_made: 3,
            outstanding_balance: dec!(13_900_000),
            status: LoanStatus::Active,
            email: "klein42@gmail.com".into(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        sample_record().check_invariants(as_of()).unwrap();
    }

    #[test]
    fn test_paid_off_with_balance_fails() {
        let mut r = sample_record();
        r.status = LoanStatus::PaidOff;
        assert!(r.check_invariants(as_of()).is_err());
        r.payments_made = 36;
        assert!(r.check_invariants(as_of()).is_err());
        r.outstanding_balance = Decimal::ZERO;
        r.check_invariants(as_of()).unwrap();
    }

    #[test]
    fn test_out_of_range_fields_fail() {
        let mut r = sample_record();
        r.loan_amount = dec!(14_999_999);
        assert!(r.check_invariants(as_of()).is_err());

        let mut r = sample_record();
        r.interest_rate_percent = dec!(15.51);
        assert!(r.check_invariants(as_of()).is_err());

        let mut r = sample_record();
        r.interest_rate_percent = dec!(9.123);
        assert!(r.check_invariants(as_of()).is_err());

        let mut r = sample_record();
        r.disbursed_date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        assert!(r.check_invariants(as_of()).is_err());

        let mut r = sample_record();
        r.payments_made = 37;
        assert!(r.check_invariants(as_of()).is_err());
    }

    #[test]
    fn test_padded_id_width() {
        assert_eq!(padded_id('C', 1, 100), "C0001");
        assert_eq!(padded_id('L', 42, 9999), "L0042");
        assert_eq!(padded_id('C', 7, 12_000), "C00007");
        assert!(padded_id('C', 9_999, 10_000) < padded_id('C', 10_000, 10_000));
    }

    #[test]
    fn test_serializes_with_export_labels() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["status"], "Active");
        assert_eq!(json["region"], "Texas");
        assert_eq!(json["term_months"], 36);
        assert_eq!(json["disbursed_date"], "2025-03-01");
    }
}
