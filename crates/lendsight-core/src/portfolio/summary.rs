//! Rollups computed from a generated record set.
//!
//! Unlike the analytics bundle these figures are derived from the records
//! themselves, so they always agree with an export of the same run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{LoanStatus, Money, Percent, Region};

use super::record::LoanRecord;

/// Count and balance of one status bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBucket {
    pub status: LoanStatus,
    pub count: u64,
    pub outstanding_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_clients: u64,
    pub open_loans: u64,
    pub total_principal: Money,
    /// Outstanding balance of active and late loans.
    pub active_loan_balance: Money,
    pub average_loan_size: Money,
    /// Principal-weighted average rate, in percent.
    pub weighted_avg_rate_pct: Percent,
    pub status_breakdown: Vec<StatusBucket>,
    pub clients_by_region: BTreeMap<Region, u64>,
}

/// Summarize a record set. An empty set yields zeros throughout.
pub fn summarize_portfolio(records: &[LoanRecord]) -> PortfolioSummary {
    let total_principal: Money = records.iter().map(|r| r.loan_amount).sum();
    let open: Vec<&LoanRecord> = records.iter().filter(|r| r.status.is_open()).collect();
    let active_loan_balance: Money = open.iter().map(|r| r.outstanding_balance).sum();

    let average_loan_size = if records.is_empty() {
        Decimal::ZERO
    } else {
        (total_principal / Decimal::from(records.len() as u64)).round_dp(2)
    };

    // Zero-principal records carry no rate weight.
    let weighted_avg_rate_pct = if total_principal.is_zero() {
        Decimal::ZERO
    } else {
        let weighted: Decimal = records
            .iter()
            .map(|r| r.loan_amount * r.interest_rate_percent)
            .sum();
        (weighted / total_principal).round_dp(4)
    };

    let status_breakdown = [LoanStatus::Active, LoanStatus::LatePayment, LoanStatus::PaidOff]
        .into_iter()
        .map(|status| {
            let matching = records.iter().filter(|r| r.status == status);
            StatusBucket {
                status,
                count: matching.clone().count() as u64,
                outstanding_balance: matching.map(|r| r.outstanding_balance).sum(),
            }
        })
        .collect();

    let mut clients_by_region = BTreeMap::new();
    for r in records {
        *clients_by_region.entry(r.region).or_insert(0u64) += 1;
    }

    PortfolioSummary {
        total_clients: records.len() as u64,
        open_loans: open.len() as u64,
        total_principal,
        active_loan_balance,
        average_loan_size,
        weighted_avg_rate_pct,
        status_breakdown,
        clients_by_region,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::generate_portfolio;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_portfolio() {
        let s = summarize_portfolio(&[]);
        assert_eq!(s.total_clients, 0);
        assert_eq!(s.active_loan_balance, Decimal::ZERO);
        assert_eq!(s.status_breakdown.iter().map(|b| b.count).sum::<u64>(), 0);
    }

    #[test]
    fn test_zero_principal_records_do_not_divide_by_zero() {
        let as_of = NaiveDate::from_ymd_opt(2025, 9, 27).unwrap();
        let mut records = generate_portfolio(42, 3, as_of).unwrap();
        for r in &mut records {
            r.loan_amount = Decimal::ZERO;
        }
        let s = summarize_portfolio(&records);
        assert_eq!(s.total_clients, 3);
        assert_eq!(s.total_principal, Decimal::ZERO);
        assert_eq!(s.average_loan_size, Decimal::ZERO);
        assert_eq!(s.weighted_avg_rate_pct, Decimal::ZERO);
    }

    #[test]
    fn test_summary_agrees_with_records() {
        let as_of = NaiveDate::from_ymd_opt(2025, 9, 27).unwrap();
        let records = generate_portfolio(42, 200, as_of).unwrap();
        let s = summarize_portfolio(&records);

        assert_eq!(s.total_clients, 200);
        assert_eq!(s.status_breakdown.iter().map(|b| b.count).sum::<u64>(), 200);
        assert_eq!(s.clients_by_region.values().sum::<u64>(), 200);

        let expected: Decimal = records
            .iter()
            .filter(|r| r.status != LoanStatus::PaidOff)
            .map(|r| r.outstanding_balance)
            .sum();
        assert_eq!(s.active_loan_balance, expected);

        let paid_off = s
            .status_breakdown
            .iter()
            .find(|b| b.status == LoanStatus::PaidOff)
            .unwrap();
        assert_eq!(paid_off.outstanding_balance, Decimal::ZERO);
        assert!(s.weighted_avg_rate_pct >= dec!(8.5) && s.weighted_avg_rate_pct <= dec!(15.5));
    }
}
