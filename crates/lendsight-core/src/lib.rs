pub mod amortization;
pub mod config;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod portfolio;
pub mod rng;
pub mod sampling;
pub mod types;

#[cfg(feature = "analytics")]
pub mod analytics;

pub use config::GeneratorConfig;
pub use error::LendSightError;
pub use portfolio::{generate_portfolio, generate_portfolio_with_config, LoanRecord};
pub use rng::GenerationContext;
pub use types::*;

#[cfg(feature = "analytics")]
pub use analytics::{generate_analytics, generate_analytics_with_config, AnalyticsBundle};

/// Standard result type for all lendsight operations
pub type LendSightResult<T> = Result<T, LendSightError>;
