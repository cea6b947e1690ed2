//! Date and time recognition
//!
//! Every function takes the reference day explicitly so results are
//! reproducible; month-and-day dates use the reference day's year.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::pattern;
use super::places::contains_phrase;

const MONTH: &str = r"(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)";

static ISO_DATE: Lazy<Regex> = Lazy::new(|| pattern(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"));
static SLASH_DATE: Lazy<Regex> = Lazy::new(|| pattern(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b"));
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| pattern(&format!(r"\b{MONTH}\s+(\d{{1,2}})(?:st|nd|rd|th)?\b")));
static MONTH_DAY_RANGE: Lazy<Regex> =
    Lazy::new(|| pattern(&format!(r"\b{MONTH}\s+(\d{{1,2}})\s*-\s*(\d{{1,2}})\b")));
static MONTH_DAY_TO: Lazy<Regex> = Lazy::new(|| {
    pattern(&format!(
        r"\b{MONTH}\s+(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:to|until)\s+(?:{MONTH}\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\b"
    ))
});
static NIGHTS: Lazy<Regex> = Lazy::new(|| pattern(r"\b(\d+)\s+nights?\b"));

static TIME_12H: Lazy<Regex> = Lazy::new(|| pattern(r"\b(\d{1,2}):(\d{2})\s*(am|pm)\b"));
static HOUR_12H: Lazy<Regex> = Lazy::new(|| pattern(r"\b(\d{1,2})\s*(am|pm)\b"));
static TIME_24H: Lazy<Regex> = Lazy::new(|| pattern(r"\b(\d{1,2}):(\d{2})\b"));

/// Longest stay "N nights" may ask for
pub const MAX_NIGHTS: u64 = 365;

const RELATIVE_DAYS: &[(&str, u64)] = &[("today", 0), ("tomorrow", 1), ("tonight", 0), ("next week", 7)];

pub fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn num(text: &str) -> Option<u32> {
    text.parse().ok()
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, num(month)?, num(day)?)
}

/// Every ISO, day/month/year and month-name date in the text, by position
pub fn find_dates(lowered: &str, today: NaiveDate) -> Vec<(usize, NaiveDate)> {
    let mut found = Vec::new();

    for caps in ISO_DATE.captures_iter(lowered) {
        if let (Some(m), Some(date)) = (caps.get(0), ymd(&caps[1], &caps[2], &caps[3])) {
            found.push((m.start(), date));
        }
    }
    // day/month/year
    for caps in SLASH_DATE.captures_iter(lowered) {
        if let (Some(m), Some(date)) = (caps.get(0), ymd(&caps[3], &caps[2], &caps[1])) {
            found.push((m.start(), date));
        }
    }
    for caps in MONTH_DAY.captures_iter(lowered) {
        let date = month_number(&caps[1])
            .zip(num(&caps[2]))
            .and_then(|(month, day)| NaiveDate::from_ymd_opt(today.year(), month, day));
        if let (Some(m), Some(date)) = (caps.get(0), date) {
            found.push((m.start(), date));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    found
}

/// Explicit date starting exactly at byte offset `at`
pub fn date_at(lowered: &str, at: usize, today: NaiveDate) -> Option<NaiveDate> {
    find_dates(lowered, today)
        .into_iter()
        .find(|(pos, _)| *pos == at)
        .map(|(_, date)| date)
}

/// "December 20-22" or "December 20 to December 22"
pub fn date_range(lowered: &str, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    if let Some(caps) = MONTH_DAY_RANGE.captures(lowered) {
        let month = month_number(&caps[1])?;
        let start = NaiveDate::from_ymd_opt(today.year(), month, num(&caps[2])?)?;
        let end = NaiveDate::from_ymd_opt(today.year(), month, num(&caps[3])?)?;
        return Some((start, end));
    }

    let caps = MONTH_DAY_TO.captures(lowered)?;
    let start_month = month_number(&caps[1])?;
    let end_month = match caps.get(3) {
        Some(m) => month_number(m.as_str())?,
        None => start_month,
    };
    let start = NaiveDate::from_ymd_opt(today.year(), start_month, num(&caps[2])?)?;
    let mut end = NaiveDate::from_ymd_opt(today.year(), end_month, num(&caps[4])?)?;
    if end < start {
        // December 30 to January 2
        end = NaiveDate::from_ymd_opt(today.year() + 1, end_month, end.day())?;
    }
    Some((start, end))
}

/// today / tomorrow / tonight / next week
pub fn relative_date(lowered: &str, today: NaiveDate) -> Option<NaiveDate> {
    RELATIVE_DAYS
        .iter()
        .find(|(word, _)| contains_phrase(lowered, word))
        .and_then(|(_, days)| today.checked_add_days(Days::new(*days)))
}

/// Length of stay from "N nights", between 1 and [`MAX_NIGHTS`]
pub fn nights(lowered: &str) -> Option<u64> {
    NIGHTS
        .captures(lowered)
        .and_then(|caps| caps[1].parse().ok())
        .filter(|n| (1..=MAX_NIGHTS).contains(n))
}

/// First date mentioned explicitly, else a relative one
pub fn single_date(lowered: &str, today: NaiveDate) -> Option<NaiveDate> {
    find_dates(lowered, today)
        .first()
        .map(|(_, date)| *date)
        .or_else(|| relative_date(lowered, today))
}

/// Check-in and check-out of a stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StayDates {
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
}

impl StayDates {
    /// Resolve both ends of a stay from one request
    ///
    /// Check-out falls back to check-in plus the stated number of nights,
    /// or one night. A stated stay outside 1..=[`MAX_NIGHTS`] leaves check-out unset.
    pub fn resolve(lowered: &str, today: NaiveDate) -> Self {
        if let Some((checkin, checkout)) = date_range(lowered, today) {
            return Self {
                checkin: Some(checkin),
                checkout: Some(checkout),
            };
        }

        let explicit = find_dates(lowered, today);
        let checkin = explicit
            .first()
            .map(|(_, date)| *date)
            .or_else(|| relative_date(lowered, today));
        let checkout = explicit.get(1).map(|(_, date)| *date).or_else(|| {
            let stay = if NIGHTS.is_match(lowered) { nights(lowered)? } else { 1 };
            checkin?.checked_add_days(Days::new(stay))
        });

        Self { checkin, checkout }
    }
}

/// Time of day, normalized to 24 hours
pub fn time_of_day(lowered: &str) -> Option<NaiveTime> {
    if let Some(caps) = TIME_12H.captures(lowered) {
        return twelve_hour(num(&caps[1])?, num(&caps[2])?, &caps[3]);
    }
    if let Some(caps) = HOUR_12H.captures(lowered) {
        return twelve_hour(num(&caps[1])?, 0, &caps[2]);
    }
    let caps = TIME_24H.captures(lowered)?;
    NaiveTime::from_hms_opt(num(&caps[1])?, num(&caps[2])?, 0)
}

fn twelve_hour(hour: u32, minute: u32, meridiem: &str) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = match (meridiem, hour) {
        ("am", 12) => 0,
        ("pm", 12) => 12,
        ("pm", h) => h + 12,
        (_, h) => h,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}
