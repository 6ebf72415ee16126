use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rng::GenerationContext;
use crate::types::Money;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// May carries a one-off disbursement spike so the dashboard has an outlier to flag.
pub const ANOMALY_MONTH: usize = 4;
pub const ANOMALY_AMOUNT: i64 = 882_900_000;

/// Months `0..PRIOR_YEAR_MONTHS` of the series belong to the year before the
/// generation date; the rest to the generation year.
const PRIOR_YEAR_MONTHS: usize = 7;
const BASELINE_AMOUNT: i64 = 100_000_000;
const BASELINE_SWING: i64 = 50_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub year: i32,
    pub amount: Money,
}

/// Twelve months of disbursement volume with one injected anomaly.
pub fn monthly_trends(ctx: &mut GenerationContext, as_of: NaiveDate) -> Vec<MonthlyTrend> {
    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let amount = match i {
                ANOMALY_MONTH => ANOMALY_AMOUNT,
                1 | 2 => ctx.uniform_int(9_000_000, 10_000_000),
                3 | 5 | 6 => ctx.uniform_int(100_000_000, 200_000_000),
                7..=9 => ctx.uniform_int(300_000_000, 450_000_000),
                10 => ctx.uniform_int(400_000_000, 500_000_000),
                _ => BASELINE_AMOUNT + ctx.uniform_int(-BASELINE_SWING, BASELINE_SWING),
            };
            let year = if i < PRIOR_YEAR_MONTHS {
                as_of.year() - 1
            } else {
                as_of.year()
            };
            MonthlyTrend {
                month: month.to_string(),
                year,
                amount: Decimal::from(amount),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trends(seed: u64) -> Vec<MonthlyTrend> {
        let mut ctx = GenerationContext::new(seed);
        monthly_trends(&mut ctx, NaiveDate::from_ymd_opt(2025, 9, 27).unwrap())
    }

    #[test]
    fn test_twelve_months_with_anomaly() {
        let t = trends(42);
        assert_eq!(t.len(), 12);
        assert_eq!(t[4].month, "May");
        assert_eq!(t[4].amount, dec!(882_900_000));
        let max = t.iter().map(|m| m.amount).max().unwrap();
        assert_eq!(max, dec!(882_900_000));
    }

    #[test]
    fn test_year_split() {
        let t = trends(42);
        assert!(t[..7].iter().all(|m| m.year == 2024));
        assert!(t[7..].iter().all(|m| m.year == 2025));
    }

    #[test]
    fn test_band_ranges() {
        for seed in 0..50 {
            let t = trends(seed);
            assert!(t[1].amount >= dec!(9_000_000) && t[1].amount <= dec!(10_000_000));
            assert!(t[8].amount >= dec!(300_000_000) && t[8].amount <= dec!(450_000_000));
            assert!(t[10].amount >= dec!(400_000_000) && t[10].amount <= dec!(500_000_000));
            assert!(t[0].amount >= dec!(50_000_000) && t[0].amount <= dec!(150_000_000));
        }
    }
}
