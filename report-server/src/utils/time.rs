//! Request-layer time parsing
//!
//! Query parameters arrive as strings; everything is converted here so
//! handlers hand the engine typed values only.

use chrono::{NaiveDate, Timelike};

use shared::{AppError, AppResult};

/// Parse `HH:MM` into minutes since midnight
pub fn parse_hhmm(raw: &str) -> AppResult<u32> {
    let parsed = chrono::NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {raw}, expected HH:MM")))?;
    Ok(parsed.hour() * 60 + parsed.minute())
}

/// Parse `YYYY-MM` into the first day of that month
pub fn parse_month(raw: &str) -> AppResult<NaiveDate> {
    let with_day = format!("{raw}-01");
    NaiveDate::parse_from_str(&with_day, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid month format: {raw}, expected YYYY-MM")))
}
