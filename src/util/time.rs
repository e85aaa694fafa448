//! Date alias conversion.
//!
//! The bed API takes literal dates (`YYYY-MM-DD`) and months (`YYYY-MM`).
//! Callers may pass friendly aliases instead; anything that is not a known
//! alias is passed through untouched as an already-literal date.

use chrono::{Datelike, Local, Months, NaiveDate};

/// `strftime` pattern for day-level dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `strftime` pattern for month-level dates.
pub const MONTH_FORMAT: &str = "%Y-%m";

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Today's date in local time.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date the way the API expects.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Convert `today`, `yesterday` or an empty string to a literal date.
#[must_use]
pub fn convert_date_alias(alias: &str) -> String {
    convert_date_alias_at(alias, today())
}

/// [`convert_date_alias`] relative to an explicit `today`.
#[must_use]
pub fn convert_date_alias_at(alias: &str, today: NaiveDate) -> String {
    match alias.to_lowercase().as_str() {
        "" | "today" => format_date(today),
        "yesterday" => format_date(today.pred_opt().unwrap_or(today)),
        _ => alias.to_string(),
    }
}

/// Normalize a sleep-data interval such as `d1`, `w1` or `m1`.
///
/// Empty input means one day.
#[must_use]
pub fn convert_time_length(alias: &str) -> String {
    if alias.is_empty() {
        "D1".to_string()
    } else {
        alias.to_uppercase()
    }
}

/// Convert `this`, `last` or a month name to a literal `YYYY-MM`.
#[must_use]
pub fn convert_monthly_date_alias(alias: &str) -> String {
    convert_monthly_date_alias_at(alias, today())
}

/// [`convert_monthly_date_alias`] relative to an explicit `today`.
///
/// A named month resolves to its most recent occurrence: this year if the
/// month has been reached, otherwise last year. December always resolves to
/// the current year.
#[must_use]
pub fn convert_monthly_date_alias_at(alias: &str, today: NaiveDate) -> String {
    let lowered = alias.to_lowercase();
    match lowered.as_str() {
        "this" => today.format(MONTH_FORMAT).to_string(),
        "last" => today
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(1)))
            .map_or_else(|| alias.to_string(), |d| d.format(MONTH_FORMAT).to_string()),
        name => match MONTH_NAMES.iter().position(|m| *m == name) {
            Some(index) => {
                let month = u32::try_from(index).unwrap_or(0) + 1;
                let year = if month == 12 || today.month() >= month {
                    today.year()
                } else {
                    today.year() - 1
                };
                format!("{year:04}-{month:02}")
            }
            None => alias.to_string(),
        },
    }
}
