//! Date-range normalization
//!
//! Raw range inputs arrive unordered, possibly open-ended and possibly
//! malformed. Normalization is deliberately permissive: malformed entries
//! are dropped silently, and only a fully empty result falls back to the
//! default trailing 30-day window.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use shared::models::DateRange;

use super::calendar::Calendar;

/// Raw range input as supplied by the request layer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeInput {
    /// `YYYY-MM-DD`
    pub start: String,
    /// `YYYY-MM-DD`, inclusive; missing means single day
    #[serde(default)]
    pub end: Option<String>,
}

/// Parse a comma-separated query value into raw inputs
///
/// Accepted entries: `START:END` or a bare `START` day. Entries that are
/// empty after trimming are skipped here; date validation happens in
/// [`normalize`].
pub fn parse_range_list(raw: &str) -> Vec<RangeInput> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((start, end)) => RangeInput {
                start: start.trim().to_string(),
                end: Some(end.trim().to_string()),
            },
            None => RangeInput {
                start: entry.to_string(),
                end: None,
            },
        })
        .collect()
}

/// Normalize raw inputs into canonical half-open ranges
///
/// Rules:
/// - missing `end` = single-day range
/// - swapped bounds are corrected, never rejected
/// - malformed dates drop the entry
/// - empty result synthesizes `[today-29d, today]`
pub fn normalize(inputs: &[RangeInput], cal: &Calendar) -> Vec<DateRange> {
    normalize_at(inputs, cal, cal.today())
}

/// [`normalize`] with an explicit "today", for deterministic tests
pub fn normalize_at(inputs: &[RangeInput], cal: &Calendar, today: NaiveDate) -> Vec<DateRange> {
    let mut ranges: Vec<DateRange> = inputs
        .iter()
        .filter_map(|input| {
            let start = parse_day(&input.start)?;
            let end = match &input.end {
                Some(raw) => parse_day(raw)?,
                None => start,
            };
            let (start, end) = if end < start { (end, start) } else { (start, end) };
            Some(build_range(cal, start, end))
        })
        .collect();

    if ranges.is_empty() {
        let start = today - chrono::Duration::days(29);
        ranges.push(build_range(cal, start, today));
    }
    ranges
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(input = %raw, "Dropping malformed range date");
            None
        }
    }
}

fn build_range(cal: &Calendar, start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange {
        start_ms: cal.day_start_ms(start),
        end_ms: cal.day_end_ms(end),
        start_day: Calendar::day_key(start),
        end_day: Calendar::day_key(end),
        label: format_label(start, end),
    }
}

/// Human label, shape depends on the span
fn format_label(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        format!("{} {}", start.day(), start.format("%B %Y"))
    } else if start.year() == end.year() && start.month() == end.month() {
        format!("{} – {} {}", start.day(), end.day(), start.format("%B %Y"))
    } else if start.year() == end.year() {
        format!(
            "{} {} – {} {}",
            start.day(),
            start.format("%b"),
            end.day(),
            end.format("%b %Y"),
        )
    } else {
        format!(
            "{} {} – {} {}",
            start.day(),
            start.format("%b %Y"),
            end.day(),
            end.format("%b %Y"),
        )
    }
}
