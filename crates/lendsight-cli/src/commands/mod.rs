pub mod analytics;
pub mod clients;
pub mod export;
pub mod schedule;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Generation date: the pinned `--as-of` date or today.
pub fn resolve_as_of(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

/// Generation timestamp: midnight of the pinned `--as-of` date, or now.
pub fn resolve_generated_at(as_of: Option<NaiveDate>) -> NaiveDateTime {
    match as_of {
        Some(date) => date.and_time(NaiveTime::MIN),
        None => Local::now().naive_local(),
    }
}
