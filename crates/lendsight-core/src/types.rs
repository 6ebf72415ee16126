use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LendSightError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates quoted as percentages (12.5 = 12.5%), the way loan sheets show them.
pub type Percent = Decimal;

/// The only loan terms the generator issues, in months.
pub const ALLOWED_TERMS: [u32; 5] = [36, 48, 60, 72, 84];

/// A loan term drawn from [`ALLOWED_TERMS`].
///
/// Construction goes through `TryFrom<u32>`, so an out-of-set term cannot reach the
/// amortization maths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TermMonths(u32);

impl TermMonths {
    pub fn months(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TermMonths {
    type Error = LendSightError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        if ALLOWED_TERMS.contains(&months) {
            Ok(TermMonths(months))
        } else {
            Err(LendSightError::InvalidInput {
                field: "term_months".into(),
                reason: format!("{months} is not one of {ALLOWED_TERMS:?}"),
            })
        }
    }
}

impl From<TermMonths> for u32 {
    fn from(term: TermMonths) -> Self {
        term.0
    }
}

impl fmt::Display for TermMonths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Collateral class backing a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "Retail Mall")]
    RetailMall,
    #[serde(rename = "Mixed-Use")]
    MixedUse,
    #[serde(rename = "Apartment Block")]
    ApartmentBlock,
    #[serde(rename = "Office Space")]
    OfficeSpace,
    #[serde(rename = "Warehouse")]
    Warehouse,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::RetailMall,
        PropertyType::MixedUse,
        PropertyType::ApartmentBlock,
        PropertyType::OfficeSpace,
        PropertyType::Warehouse,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::RetailMall => "Retail Mall",
            PropertyType::MixedUse => "Mixed-Use",
            PropertyType::ApartmentBlock => "Apartment Block",
            PropertyType::OfficeSpace => "Office Space",
            PropertyType::Warehouse => "Warehouse",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// US market a client is booked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "New York")]
    NewYork,
    California,
    Illinois,
    Florida,
    Texas,
}

impl Region {
    pub fn label(self) -> &'static str {
        match self {
            Region::NewYork => "New York",
            Region::California => "California",
            Region::Illinois => "Illinois",
            Region::Florida => "Florida",
            Region::Texas => "Texas",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Repayment lifecycle of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    #[serde(rename = "Late Payment")]
    LatePayment,
    #[serde(rename = "Paid Off")]
    PaidOff,
}

impl LoanStatus {
    pub fn label(self) -> &'static str {
        match self {
            LoanStatus::Active => "Active",
            LoanStatus::LatePayment => "Late Payment",
            LoanStatus::PaidOff => "Paid Off",
        }
    }

    /// Loans still carrying a balance on the book.
    pub fn is_open(self) -> bool {
        !matches!(self, LoanStatus::PaidOff)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Helper to wrap generated data with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    seed: Option<u64>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            seed,
        },
    }
}
