use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::rng::GenerationContext;
use crate::types::{LoanStatus, Money, Region};

// ---------------------------------------------------------------------------
// Headline ranges
// ---------------------------------------------------------------------------

const ACTIVE_BALANCE_RANGE: (i64, i64) = (2_400_000_000, 2_500_000_000);
const ROLLING_12M_RANGE: (i64, i64) = (3_500_000_000, 3_700_000_000);
const AVERAGE_LOAN_RANGE: (i64, i64) = (125_000_000, 135_000_000);
const ACTIVE_BALANCE_YTD_CHANGE_PCT: Decimal = dec!(-1);
const ACTIVE_CLIENTS: u32 = 50;
const TOTAL_CLIENTS: u32 = 60;
const ACTIVE_LOANS: u32 = 86;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceMetric {
    pub value: Money,
    /// Change against the prior year to date, in percent.
    pub ytd_change_percent: Decimal,
}

/// Share of loans in each lifecycle status, as fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatusMix {
    pub active: Decimal,
    pub late_payment: Decimal,
    pub paid_off: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionShare {
    pub region: Region,
    pub share: Decimal,
}

/// Headline figures of the portfolio dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioOverview {
    pub active_loan_balance: BalanceMetric,
    pub rolling_12m_amount: Money,
    pub average_loan_size: Money,
    pub active_clients: u32,
    pub total_clients: u32,
    pub active_loans: u32,
    pub payment_status: PaymentStatusMix,
    pub clients_by_region: Vec<RegionShare>,
}

/// Draw the headline amounts; the mixes are read from the configured tables.
pub fn portfolio_overview(ctx: &mut GenerationContext, config: &GeneratorConfig) -> PortfolioOverview {
    let mut draw = |(low, high): (i64, i64)| Decimal::from(ctx.uniform_int(low, high));
    let active_balance = draw(ACTIVE_BALANCE_RANGE);
    let rolling_12m_amount = draw(ROLLING_12M_RANGE);
    let average_loan_size = draw(AVERAGE_LOAN_RANGE);

    let status_shares = config.statuses.shares();
    let share_of = |status: LoanStatus| {
        status_shares
            .iter()
            .filter(|(s, _)| **s == status)
            .map(|(_, share)| *share)
            .sum::<Decimal>()
    };

    PortfolioOverview {
        active_loan_balance: BalanceMetric {
            value: active_balance,
            ytd_change_percent: ACTIVE_BALANCE_YTD_CHANGE_PCT,
        },
        rolling_12m_amount,
        average_loan_size,
        active_clients: ACTIVE_CLIENTS,
        total_clients: TOTAL_CLIENTS,
        active_loans: ACTIVE_LOANS,
        payment_status: PaymentStatusMix {
            active: share_of(LoanStatus::Active),
            late_payment: share_of(LoanStatus::LatePayment),
            paid_off: share_of(LoanStatus::PaidOff),
        },
        clients_by_region: config
            .regions
            .shares()
            .into_iter()
            .map(|(region, share)| RegionShare {
                region: *region,
                share,
            })
            .collect(),
    }
}
