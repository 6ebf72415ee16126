//! Per-client loan records.

pub mod generator;
pub mod record;
pub mod summary;

pub use generator::{generate_portfolio, generate_portfolio_with_config};
pub use record::LoanRecord;
pub use summary::{summarize_portfolio, PortfolioSummary};
