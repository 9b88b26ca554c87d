//! Shared utility functions for MMP crates.

/// Date utility functions
pub mod dates {
    use chrono::{NaiveDate, TimeDelta};

    /// Date format understood by the prediction service: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Length of the default prediction window in days.
    pub const DEFAULT_WINDOW_DAYS: i64 = 7;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// Parse the calendar date at the front of a timestamp.
    ///
    /// Accepts "2024-01-15", "2024-01-15T00:00:00" and "2024-01-15 00:00".
    pub fn parse_date_prefix(s: &str) -> anyhow::Result<NaiveDate> {
        let trimmed = s.trim();
        let day = trimmed
            .split(|c: char| c == 'T' || c.is_whitespace())
            .next()
            .unwrap_or(trimmed);
        parse_date(day)
    }

    /// The window a fresh query starts with: `today` through one week later.
    pub fn default_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = today
            .checked_add_signed(TimeDelta::days(DEFAULT_WINDOW_DAYS))
            .unwrap_or(today);
        (today, end)
    }

}
