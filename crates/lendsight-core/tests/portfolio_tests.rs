use chrono::NaiveDate;
use lendsight_core::lifecycle::months_elapsed;
use lendsight_core::portfolio::{generate_portfolio, summarize_portfolio};
use lendsight_core::{LoanStatus, TermMonths};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 27).unwrap()
}

// ===========================================================================
// Reproducibility
// ===========================================================================

#[test]
fn test_same_seed_same_portfolio() {
    for seed in [0, 1, 42, u64::MAX] {
        let a = generate_portfolio(seed, 150, as_of()).unwrap();
        let b = generate_portfolio(seed, 150, as_of()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_same_seed_same_json_bytes() {
    let a = serde_json::to_string(&generate_portfolio(42, 100, as_of()).unwrap()).unwrap();
    let b = serde_json::to_string(&generate_portfolio(42, 100, as_of()).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_differ() {
    let a = generate_portfolio(42, 20, as_of()).unwrap();
    let b = generate_portfolio(43, 20, as_of()).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_seed_42_single_client() {
    let first = generate_portfolio(42, 1, as_of()).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].client_id, "C0001");
    assert_eq!(first[0].loan_id, "L0001");

    let again = generate_portfolio(42, 1, as_of()).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_prefix_of_larger_run_matches_smaller_run() {
    // Records consume draws in order, so the first n records do not depend on the count.
    let small = generate_portfolio(42, 10, as_of()).unwrap();
    let large = generate_portfolio(42, 50, as_of()).unwrap();
    assert_eq!(small[..], large[..10]);
}

// ===========================================================================
// Record invariants
// ===========================================================================

#[test]
fn test_balances_never_negative() {
    for seed in 0..20 {
        for r in generate_portfolio(seed, 200, as_of()).unwrap() {
            assert!(r.outstanding_balance >= Decimal::ZERO, "{r:?}");
            assert!(r.monthly_payment >= Decimal::ZERO, "{r:?}");
        }
    }
}

#[test]
fn test_paid_off_loans_are_closed() {
    let records = generate_portfolio(42, 1_000, as_of()).unwrap();
    let paid_off: Vec<_> = records
        .iter()
        .filter(|r| r.status == LoanStatus::PaidOff)
        .collect();
    assert!(!paid_off.is_empty());
    for r in paid_off {
        assert_eq!(r.payments_made, r.term_months.months());
        assert_eq!(r.outstanding_balance, Decimal::ZERO);
    }
}

#[test]
fn test_payments_bounded_by_term() {
    for r in generate_portfolio(3, 1_000, as_of()).unwrap() {
        assert!(r.payments_made <= r.term_months.months(), "{r:?}");
    }
}

#[test]
fn test_zero_balance_iff_fully_paid() {
    for r in generate_portfolio(11, 1_000, as_of()).unwrap() {
        assert_eq!(
            r.outstanding_balance.is_zero(),
            r.payments_made == r.term_months.months(),
            "{r:?}"
        );
    }
}

#[test]
fn test_late_loans_are_behind_schedule() {
    let records = generate_portfolio(42, 1_000, as_of()).unwrap();
    let mut checked = 0;
    for r in records.iter().filter(|r| r.status == LoanStatus::LatePayment) {
        let elapsed = months_elapsed(r.disbursed_date, as_of());
        if elapsed > 0 {
            assert!(r.payments_made < elapsed, "{r:?}");
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_active_loans_are_on_schedule() {
    for r in generate_portfolio(5, 500, as_of()).unwrap() {
        if r.status == LoanStatus::Active {
            let elapsed = months_elapsed(r.disbursed_date, as_of());
            assert_eq!(r.payments_made, elapsed.min(r.term_months.months()));
        }
    }
}

#[test]
fn test_field_ranges() {
    let earliest = NaiveDate::from_ymd_opt(2023, 9, 28).unwrap();
    for r in generate_portfolio(8, 1_000, as_of()).unwrap() {
        assert!(r.loan_amount >= Decimal::from(15_000_000) && r.loan_amount <= Decimal::from(300_000_000));
        assert!(r.interest_rate_percent >= Decimal::new(85, 1));
        assert!(r.interest_rate_percent <= Decimal::new(155, 1));
        assert!(r.interest_rate_percent.scale() <= 2);
        assert!(TermMonths::try_from(r.term_months.months()).is_ok());
        assert!(r.disbursed_date >= earliest && r.disbursed_date <= as_of());
        assert!((60..=90).contains(&r.ltv_percent));
        assert!(r.email.contains('@'));
    }
}

// ===========================================================================
// Summary
// ===========================================================================

#[test]
fn test_status_mix_roughly_matches_table() {
    let records = generate_portfolio(42, 5_000, as_of()).unwrap();
    let summary = summarize_portfolio(&records);
    let share = |status: LoanStatus| {
        summary
            .status_breakdown
            .iter()
            .find(|b| b.status == status)
            .map(|b| b.count as f64 / 5_000.0)
            .unwrap()
    };
    assert!((share(LoanStatus::Active) - 0.76).abs() < 0.03);
    assert!((share(LoanStatus::LatePayment) - 0.10).abs() < 0.02);
    assert!((share(LoanStatus::PaidOff) - 0.14).abs() < 0.02);
}
