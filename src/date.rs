//! Calendar day helpers

use chrono::{Local, NaiveDate};

/// Today's local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date the way the ledger stores submission days (YYYY-MM-DD)
pub fn day_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
