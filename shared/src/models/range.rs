//! Normalized date ranges

use serde::{Deserialize, Serialize};

/// Canonical half-open date range `[start, end)` in the business timezone
///
/// Multiple ranges form a union: a record matches if it falls in any of
/// them. `end_day` is the last *inclusive* calendar day, `end_ms` the
/// exclusive boundary instant (start of the following day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Inclusive start instant (Unix millis)
    pub start_ms: i64,
    /// Exclusive end instant (Unix millis)
    pub end_ms: i64,
    /// First calendar day, `YYYY-MM-DD`
    pub start_day: String,
    /// Last calendar day (inclusive), `YYYY-MM-DD`
    pub end_day: String,
    /// Human label, e.g. `"1 – 31 January 2025"`
    pub label: String,
}

impl DateRange {
    /// Whether an instant falls inside this range
    pub fn contains_ms(&self, ts: i64) -> bool {
        ts >= self.start_ms && ts < self.end_ms
    }
}
