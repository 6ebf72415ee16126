//! Portfolio-level dashboard analytics.
//!
//! The bundle is drawn from its own [`GenerationContext`] over fixed ranges and is
//! not summed from generated loan records; use
//! [`summarize_portfolio`](crate::portfolio::summarize_portfolio) for figures that
//! must reconcile with a record set.

pub mod overview;
pub mod property;
pub mod risk;
pub mod transactions;
pub mod trends;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::rng::GenerationContext;
use crate::LendSightResult;

pub use overview::PortfolioOverview;
pub use property::PropertyAnalytics;
pub use risk::HighRiskProfile;
pub use transactions::RecentTransaction;
pub use trends::MonthlyTrend;

/// Everything the dashboard renders besides the client table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsBundle {
    pub generated_at: NaiveDateTime,
    pub recent_transactions: Vec<RecentTransaction>,
    pub high_risk_profiles: Vec<HighRiskProfile>,
    pub portfolio_overview: PortfolioOverview,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub property_analytics: PropertyAnalytics,
}

pub fn generate_analytics(seed: u64, generated_at: NaiveDateTime) -> LendSightResult<AnalyticsBundle> {
    generate_analytics_with_config(&GeneratorConfig::default(), seed, generated_at)
}

/// Draw order: transactions, overview, trends. The watch-list and property
/// analytics are fixed.
pub fn generate_analytics_with_config(
    config: &GeneratorConfig,
    seed: u64,
    generated_at: NaiveDateTime,
) -> LendSightResult<AnalyticsBundle> {
    config.validate()?;
    tracing::debug!(seed, %generated_at, "generating analytics bundle");

    let as_of = generated_at.date();
    let mut ctx = GenerationContext::new(seed);

    let recent_transactions = transactions::recent_transactions(
        &mut ctx,
        config,
        transactions::RECENT_TRANSACTION_COUNT,
        as_of,
    )?;
    let high_risk_profiles = risk::high_risk_profiles();
    let portfolio_overview = overview::portfolio_overview(&mut ctx, config);
    let monthly_trends = trends::monthly_trends(&mut ctx, as_of);
    let property_analytics = property::property_analytics();

    Ok(AnalyticsBundle {
        generated_at,
        recent_transactions,
        high_risk_profiles,
        portfolio_overview,
        monthly_trends,
        property_analytics,
    })
}
