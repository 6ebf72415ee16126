use serde::{Deserialize, Serialize};

/// A client on the credit watch-list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighRiskProfile {
    pub client_name: String,
    pub loan_id: Option<String>,
    pub ltv_percent: Option<u32>,
    pub email: Option<String>,
    pub risk_score: u32,
}

struct WatchListEntry {
    name: &'static str,
    loan_id: Option<&'static str>,
    ltv: Option<u32>,
    email: Option<&'static str>,
    risk_score: u32,
}

const WATCH_LIST: &[WatchListEntry] = &[
    WatchListEntry {
        name: "Bender-Brown",
        loan_id: Some("L086"),
        ltv: Some(83),
        email: Some("april72@smith.biz"),
        risk_score: 95,
    },
    WatchListEntry {
        name: "Chavez & Morgan",
        loan_id: Some("L076"),
        ltv: Some(83),
        email: Some("hmcpherson@hotmail.com"),
        risk_score: 85,
    },
    WatchListEntry { name: "Mitchell-Anderson", loan_id: None, ltv: None, email: None, risk_score: 75 },
    WatchListEntry { name: "Chavez & Morgan", loan_id: None, ltv: None, email: None, risk_score: 60 },
    WatchListEntry { name: "Klein Group", loan_id: None, ltv: None, email: None, risk_score: 55 },
    WatchListEntry { name: "Flores Inc", loan_id: None, ltv: None, email: None, risk_score: 50 },
    WatchListEntry { name: "Bender-Brown", loan_id: None, ltv: None, email: None, risk_score: 45 },
];

/// The fixed watch-list, highest risk first. Consumes no random draws.
pub fn high_risk_profiles() -> Vec<HighRiskProfile> {
    WATCH_LIST
        .iter()
        .map(|entry| HighRiskProfile {
            client_name: entry.name.to_string(),
            loan_id: entry.loan_id.map(str::to_string),
            ltv_percent: entry.ltv,
            email: entry.email.map(str::to_string),
            risk_score: entry.risk_score,
        })
        .collect()
}
