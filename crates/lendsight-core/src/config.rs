//! Generator configuration.
//!
//! Every table the generator samples from lives here with its shipped default.
//! Callers may override any part (the CLI loads overrides from JSON or YAML);
//! [`GeneratorConfig::validate`] runs once before a generation run.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LendSightError;
use crate::sampling::DistributionTable;
use crate::types::{LoanStatus, PropertyType, Region};
use crate::LendSightResult;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_CLIENT_COUNT: usize = 100;

const DEFAULT_PREFIXES: &[&str] = &[
    "Willis", "Rogers", "Lee", "Vasquez", "Collins", "Bates", "Hernandez", "Jones",
    "Morrison", "Ross", "Jordan", "Thomas", "Lewis", "Bray", "Bender", "Brown", "Mitchell",
    "Anderson", "Chavez", "Morgan", "Klein", "Flores", "Smith", "Johnson", "Williams",
    "Davis", "Miller", "Wilson", "Moore", "Taylor", "Jackson", "White", "Harris", "Martin",
    "Thompson", "Garcia", "Martinez", "Robinson", "Clark", "Rodriguez", "Walker", "Hall",
    "Allen", "Young", "King", "Wright", "Lopez", "Hill", "Scott", "Green", "Adams",
    "Baker", "Nelson", "Carter", "Perez", "Roberts", "Turner", "Phillips", "Campbell",
    "Parker", "Evans", "Edwards", "Stewart", "Sanchez", "Morris", "Reed", "Cook", "Bell",
    "Murphy", "Bailey", "Rivera", "Cooper", "Richardson", "Cox", "Howard", "Ward",
    "Torres", "Peterson", "Gray", "Ramirez", "James", "Watson", "Brooks", "Kelly",
    "Sanders", "Price", "Bennett", "Wood", "Barnes",
];

const DEFAULT_SUFFIXES: &[&str] = &[
    "LLC", "Group", "Ltd", "Inc", "& Sons", "and Sons", "Associates", "Partners", "Corp",
    "Enterprises",
];

const DEFAULT_CONNECTORS: &[&str] = &["-", " & ", ", "];

const DEFAULT_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com", "yahoo.com", "hotmail.com", "outlook.com", "company.biz", "business.com",
];

/// Region mix of the book. Sums to 1.0.
pub fn default_region_table() -> DistributionTable<Region> {
    DistributionTable::weighted(vec![
        (Region::NewYork, dec!(0.29)),
        (Region::California, dec!(0.27)),
        (Region::Illinois, dec!(0.18)),
        (Region::Florida, dec!(0.12)),
        (Region::Texas, dec!(0.14)),
    ])
}

/// Lifecycle mix: 76% active, 10% late, 14% paid off.
pub fn default_status_table() -> DistributionTable<LoanStatus> {
    DistributionTable::weighted(vec![
        (LoanStatus::Active, dec!(0.76)),
        (LoanStatus::LatePayment, dec!(0.10)),
        (LoanStatus::PaidOff, dec!(0.14)),
    ])
}

pub fn default_property_table() -> DistributionTable<PropertyType> {
    DistributionTable::uniform(PropertyType::ALL.to_vec())
}

/// Fragments the identity synthesizer composes names and e-mails from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameFragments {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    pub connectors: Vec<String>,
    pub email_domains: Vec<String>,
    /// Probability a client is a two-firm partnership name.
    pub combined_name_probability: Decimal,
}

impl Default for NameFragments {
    fn default() -> Self {
        Self {
            prefixes: owned(DEFAULT_PREFIXES),
            suffixes: owned(DEFAULT_SUFFIXES),
            connectors: owned(DEFAULT_CONNECTORS),
            email_domains: owned(DEFAULT_EMAIL_DOMAINS),
            combined_name_probability: dec!(0.3),
        }
    }
}

impl NameFragments {
    pub fn validate(&self) -> LendSightResult<()> {
        for (field, list) in [
            ("names.prefixes", &self.prefixes),
            ("names.suffixes", &self.suffixes),
            ("names.connectors", &self.connectors),
            ("names.email_domains", &self.email_domains),
        ] {
            if list.is_empty() {
                return Err(LendSightError::InvalidInput {
                    field: field.into(),
                    reason: "At least one entry is required".into(),
                });
            }
        }

        let p = self.combined_name_probability;
        if p < Decimal::ZERO || p > Decimal::ONE {
            return Err(LendSightError::InvalidInput {
                field: "names.combined_name_probability".into(),
                reason: format!("{p} is outside [0, 1]"),
            });
        }

        // Partnership names need two different firms.
        if p > Decimal::ZERO {
            let first = &self.prefixes[0];
            if self.prefixes.iter().all(|name| name == first) {
                return Err(LendSightError::InvalidInput {
                    field: "names.prefixes".into(),
                    reason: "Two distinct prefixes are required for combined names".into(),
                });
            }
        }
        Ok(())
    }
}

fn owned(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

/// Tables and fragments driving one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub regions: DistributionTable<Region>,
    pub property_types: DistributionTable<PropertyType>,
    pub statuses: DistributionTable<LoanStatus>,
    pub names: NameFragments,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            regions: default_region_table(),
            property_types: default_property_table(),
            statuses: default_status_table(),
            names: NameFragments::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> LendSightResult<()> {
        self.regions.validate("regions")?;
        self.property_types.validate("property_types")?;
        self.statuses.validate("statuses")?;
        self.names.validate()
    }
}
