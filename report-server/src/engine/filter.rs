//! Record filtering
//!
//! Pure, non-mutating selection of fetched records. A record matches when
//! its timestamp falls inside *any* of the supplied half-open ranges, all
//! given dimension constraints hold (case-insensitive equality), and its
//! local time of day is inside the optional `[timeFrom, timeTo]` window.
//! Output preserves input order.

use shared::models::{AttendanceRecord, DateRange, SalesRecord};

use super::calendar::Calendar;

/// Dimension + time constraints applied on top of the range union
#[derive(Debug, Clone)]
pub struct RecordFilter {
    pub ranges: Vec<DateRange>,
    pub employee: Option<String>,
    pub store: Option<String>,
    pub status: Option<String>,
    /// Inclusive lower bound, minutes since local midnight
    pub time_from: Option<u32>,
    /// Inclusive upper bound, minutes since local midnight
    pub time_to: Option<u32>,
}

impl RecordFilter {
    pub fn new(ranges: Vec<DateRange>) -> Self {
        Self {
            ranges,
            employee: None,
            store: None,
            status: None,
            time_from: None,
            time_to: None,
        }
    }

    /// Select matching sales records, preserving order
    pub fn filter_sales<'a>(
        &self,
        records: &'a [SalesRecord],
        cal: &Calendar,
    ) -> Vec<&'a SalesRecord> {
        records
            .iter()
            .filter(|r| {
                self.in_any_range(r.timestamp_ms)
                    && self.time_ok(cal.minutes_of_day(r.timestamp_ms))
                    && matches_opt(&self.employee, &r.employee_name)
                    && matches_opt(&self.store, &r.store_name)
                    && matches_opt(&self.status, &r.status)
            })
            .collect()
    }

    /// Select matching attendance records, preserving order
    ///
    /// The status constraint compares against the wire form
    /// (`check-in` / `check-out`).
    pub fn filter_attendance<'a>(
        &self,
        records: &'a [AttendanceRecord],
        cal: &Calendar,
    ) -> Vec<&'a AttendanceRecord> {
        records
            .iter()
            .filter(|r| {
                let status_str = match r.status {
                    shared::models::AttendanceStatus::CheckIn => "check-in",
                    shared::models::AttendanceStatus::CheckOut => "check-out",
                };
                self.in_any_range(r.timestamp_ms)
                    && self.time_ok(cal.minutes_of_day(r.timestamp_ms))
                    && matches_opt(&self.employee, &r.employee_name)
                    && matches_opt(&self.store, &r.store_name)
                    && matches_opt(&self.status, status_str)
            })
            .collect()
    }

    fn in_any_range(&self, ts: i64) -> bool {
        self.ranges.iter().any(|r| r.contains_ms(ts))
    }

    fn time_ok(&self, minutes: u32) -> bool {
        if let Some(from) = self.time_from {
            if minutes < from {
                return false;
            }
        }
        if let Some(to) = self.time_to {
            if minutes > to {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive equality against an optional constraint
fn matches_opt(wanted: &Option<String>, actual: &str) -> bool {
    match wanted {
        Some(wanted) => wanted.to_lowercase() == actual.to_lowercase(),
        None => true,
    }
}
