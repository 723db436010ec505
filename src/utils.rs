// Utility functions
use chrono::NaiveDate;

/// Parses a `YYYY-MM-DD` string into a `NaiveDate`, if possible.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}
