//! Business-timezone calendar
//!
//! All instant ↔ civil conversions go through one [`Calendar`] carrying the
//! configured business zone, so handlers and the engine never touch raw
//! timezone math. Conversions use chrono's bidirectional local-time API;
//! DST gaps resolve to the later valid instant, falling back to UTC when
//! the zone has no valid mapping at all.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

/// Civil (zone-local) date-time parts of an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Zone-aware calendar for bucketing and boundary computation
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    tz: Tz,
}

impl Calendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Civil parts of an instant in the business zone
    pub fn zoned_parts(&self, ms: i64) -> CivilParts {
        let dt = DateTime::from_timestamp_millis(ms)
            .unwrap_or(DateTime::UNIX_EPOCH)
            .with_timezone(&self.tz);
        CivilParts {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    /// Zone-local calendar date of an instant
    pub fn local_date(&self, ms: i64) -> NaiveDate {
        DateTime::from_timestamp_millis(ms)
            .unwrap_or(DateTime::UNIX_EPOCH)
            .with_timezone(&self.tz)
            .date_naive()
    }

    /// Zone-local minutes since midnight, for time-of-day filtering
    pub fn minutes_of_day(&self, ms: i64) -> u32 {
        let parts = self.zoned_parts(ms);
        parts.hour * 60 + parts.minute
    }

    /// `YYYY-MM-DD` key of an instant
    pub fn day_key_of(&self, ms: i64) -> String {
        Self::day_key(self.local_date(ms))
    }

    /// `YYYY-MM-DD` key of a date
    pub fn day_key(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// `YYYY-MM` key of a date
    pub fn month_key(date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }

    /// `YYYY-Qn` key of a date
    pub fn quarter_key(date: NaiveDate) -> String {
        format!("{}-Q{}", date.year(), (date.month() - 1) / 3 + 1)
    }

    /// `YYYY` key of a date
    pub fn year_key(date: NaiveDate) -> String {
        date.format("%Y").to_string()
    }

    /// Instant (Unix millis) whose zoned civil parts equal the given
    /// date + time-of-day. DST gap: resolves to the later valid local
    /// time; if the zone yields nothing, falls back to UTC.
    pub fn zoned_instant(&self, date: NaiveDate, hour: u32, min: u32, sec: u32) -> i64 {
        let naive = date
            .and_hms_opt(hour, min, sec)
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
        naive
            .and_local_timezone(self.tz)
            .latest()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_else(|| naive.and_utc().timestamp_millis())
    }

    /// Start of a calendar day (00:00:00) as Unix millis
    pub fn day_start_ms(&self, date: NaiveDate) -> i64 {
        self.zoned_instant(date, 0, 0, 0)
    }

    /// Exclusive end of a calendar day: start of the following day
    pub fn day_end_ms(&self, date: NaiveDate) -> i64 {
        let next = date.succ_opt().unwrap_or(date);
        self.day_start_ms(next)
    }

    /// Current date in the business zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    // ========== Period boundaries (all dates, start inclusive / end exclusive) ==========

    /// Monday of the week containing `date`
    pub fn start_of_week(date: NaiveDate) -> NaiveDate {
        let back = date.weekday().num_days_from_monday() as i64;
        date - Duration::days(back)
    }

    /// Monday of the following week
    pub fn end_of_week(date: NaiveDate) -> NaiveDate {
        Self::start_of_week(date) + Duration::days(7)
    }

    /// First day of the month containing `date`
    pub fn start_of_month(date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    /// First day of the following month
    pub fn end_of_month(date: NaiveDate) -> NaiveDate {
        let (year, month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
    }

    /// January 1st of the year containing `date`
    pub fn start_of_year(date: NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
    }

    /// January 1st of the following year
    pub fn end_of_year(date: NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap_or(date)
    }

    /// First day of the month `n` months before the month containing
    /// `anchor` (n = 0 is the anchor month itself)
    pub fn months_back(anchor: NaiveDate, n: u32) -> NaiveDate {
        let total = anchor.year() * 12 + anchor.month() as i32 - 1 - n as i32;
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32 + 1;
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(anchor)
    }
}
