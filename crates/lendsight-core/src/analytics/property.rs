use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, PropertyType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyShare {
    pub property_type: PropertyType,
    pub share: Decimal,
}

/// Loan counts for the prior and current year, with the percent change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyYearOverYear {
    pub property_type: PropertyType,
    /// `None` when the prior year had no loans.
    pub change_percent: Option<Decimal>,
    pub loans_prior_year: u32,
    pub loans_current_year: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyLoanSize {
    pub property_type: PropertyType,
    pub average_loan_size: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    pub avg_ltv: Decimal,
    pub avg_interest_rate: Decimal,
    pub avg_term_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAnalytics {
    pub distribution: Vec<PropertyShare>,
    pub ytd_changes: Vec<PropertyYearOverYear>,
    pub avg_loan_sizes: Vec<PropertyLoanSize>,
    pub avg_metrics: AverageMetrics,
}

const DISTRIBUTION: [(PropertyType, Decimal); 5] = [
    (PropertyType::ApartmentBlock, dec!(0.24)),
    (PropertyType::RetailMall, dec!(0.23)),
    (PropertyType::MixedUse, dec!(0.19)),
    (PropertyType::Warehouse, dec!(0.17)),
    (PropertyType::OfficeSpace, dec!(0.17)),
];

const LOAN_COUNTS: [(PropertyType, u32, u32); 5] = [
    (PropertyType::RetailMall, 6, 7),
    (PropertyType::ApartmentBlock, 7, 8),
    (PropertyType::OfficeSpace, 4, 4),
    (PropertyType::Warehouse, 5, 3),
    (PropertyType::MixedUse, 9, 2),
];

const AVERAGE_LOAN_SIZES: [(PropertyType, i64); 5] = [
    (PropertyType::MixedUse, 173_000_000),
    (PropertyType::ApartmentBlock, 158_000_000),
    (PropertyType::OfficeSpace, 148_000_000),
    (PropertyType::Warehouse, 138_000_000),
    (PropertyType::RetailMall, 132_000_000),
];

/// Whole-percent change from `prior` to `current`, half away from zero.
pub fn percent_change(prior: u32, current: u32) -> Option<Decimal> {
    if prior == 0 {
        return None;
    }
    let prior = Decimal::from(prior);
    let change = (Decimal::from(current) - prior) / prior * dec!(100);
    Some(change.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Property-type mix and year-over-year movement. Consumes no random draws.
pub fn property_analytics() -> PropertyAnalytics {
    PropertyAnalytics {
        distribution: DISTRIBUTION
            .iter()
            .map(|(property_type, share)| PropertyShare {
                property_type: *property_type,
                share: *share,
            })
            .collect(),
        ytd_changes: LOAN_COUNTS
            .iter()
            .map(|(property_type, prior, current)| PropertyYearOverYear {
                property_type: *property_type,
                change_percent: percent_change(*prior, *current),
                loans_prior_year: *prior,
                loans_current_year: *current,
            })
            .collect(),
        avg_loan_sizes: AVERAGE_LOAN_SIZES
            .iter()
            .map(|(property_type, size)| PropertyLoanSize {
                property_type: *property_type,
                average_loan_size: Decimal::from(*size),
            })
            .collect(),
        avg_metrics: AverageMetrics {
            avg_ltv: dec!(0.74),
            avg_interest_rate: dec!(0.12),
            avg_term_months: 63,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_sums_to_one() {
        let total: Decimal = property_analytics().distribution.iter().map(|p| p.share).sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn test_year_over_year_changes() {
        let a = property_analytics();
        let change = |t: PropertyType| {
            a.ytd_changes
                .iter()
                .find(|c| c.property_type == t)
                .and_then(|c| c.change_percent)
                .unwrap()
        };
        assert_eq!(change(PropertyType::RetailMall), dec!(17));
        assert_eq!(change(PropertyType::ApartmentBlock), dec!(14));
        assert_eq!(change(PropertyType::OfficeSpace), dec!(0));
        assert_eq!(change(PropertyType::Warehouse), dec!(-40));
        assert_eq!(change(PropertyType::MixedUse), dec!(-78));
    }

    #[test]
    fn test_percent_change_without_prior() {
        assert_eq!(percent_change(0, 5), None);
        assert_eq!(percent_change(2, 3), Some(dec!(50)));
    }
}
