//! Date parsing for inline task annotations
//!
//! Dates in `[d: ...]` and `[f: ...]` annotations are written day first.
//! Supported forms, with any non-digit as separator:
//!
//! - `dd-mm` (year picked so the month lies within six months of today)
//! - `dd-mm-yy` (20yy)
//! - `dd-mm-yyyy`
//! - `yyyy-mm-dd`
//!
//! Text before or after the date is ignored.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,4})\D(\d{1,2})(?:\D(\d{1,4}))?").unwrap());

/// Parse a partial or full date expression
///
/// Returns `None` when no date is found or the numbers do not form a valid
/// calendar date.
///
/// # Examples
///
/// ```
/// use tasklist_core::utils::parse_date;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2012, 10, 1).unwrap();
/// assert_eq!(parse_date("11/12/2012", today), NaiveDate::from_ymd_opt(2012, 12, 11));
/// assert_eq!(parse_date("2012-12-11", today), NaiveDate::from_ymd_opt(2012, 12, 11));
/// assert_eq!(parse_date("11/12", today), NaiveDate::from_ymd_opt(2012, 12, 11));
/// assert_eq!(parse_date("next week", today), None);
/// ```
pub fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(input)?;
    let first = caps.get(1)?.as_str();
    let second: u32 = caps.get(2)?.as_str().parse().ok()?;
    let third = caps.get(3).map(|m| m.as_str());

    if first.len() == 4 {
        // yyyy-mm-dd; a year with month but no day is not a date
        let year: i32 = first.parse().ok()?;
        let day: u32 = third?.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, second, day);
    }

    let day: u32 = first.parse().ok()?;
    let month = second;

    match third {
        Some(year) => {
            let year = match year.len() {
                1 | 2 => 2000 + year.parse::<i32>().ok()?,
                4 => year.parse().ok()?,
                _ => return None,
            };
            NaiveDate::from_ymd_opt(year, month, day)
        }
        None => resolve_partial_date(day, month, today),
    }
}

/// Pick the year for `day`/`month` by month distance from `today`
///
/// A month more than six months ahead refers to last year, one more than six
/// months behind to next year.
fn resolve_partial_date(day: u32, month: u32, today: NaiveDate) -> Option<NaiveDate> {
    let offset = month as i32 - today.month() as i32;
    let year = match offset {
        o if o > 6 => today.year() - 1,
        o if o < -6 => today.year() + 1,
        _ => today.year(),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
