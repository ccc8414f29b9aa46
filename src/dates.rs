//! Localized rendering of calendar dates for the report's date column.

use chrono::{Datelike, NaiveDate};

use crate::locale;

/// Input format of record dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats an ISO date as `"<weekday abbreviation> <day>"`, e.g. `"Mon 01"`.
///
/// `family` is a two-letter language family code (`de`, `en`, `fr`). A date that does not parse,
/// or a family without an abbreviation table, yields the input unchanged so that one bad row never
/// aborts the whole report.
pub fn format_date(date: &str, family: &str) -> String {
    if !is_iso_date_shaped(date) {
        log::warn!("passing through date '{}' not in YYYY-MM-DD form", date);
        return date.to_owned();
    }

    let parsed = match NaiveDate::parse_from_str(date, ISO_DATE_FORMAT) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::warn!("passing through unparsable date '{}': {}", date, err);
            return date.to_owned();
        }
    };

    let weekday = parsed.weekday().number_from_monday();
    match locale::day_abbreviation(family, weekday) {
        Some(abbreviation) => format!("{} {:02}", abbreviation, parsed.day()),
        None => {
            log::warn!("no weekday abbreviations for language family '{}'", family);
            date.to_owned()
        }
    }
}

/// chrono's `%Y-%m-%d` accepts signs, padding and single-digit fields; record dates must be
/// exactly four, two and two digits.
fn is_iso_date_shaped(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Formats `date` with a locale's [`DateStyle`](crate::locale::DateStyle).
pub fn format_long_date(date: NaiveDate, style: locale::DateStyle) -> String {
    date.format(style.pattern()).to_string()
}
