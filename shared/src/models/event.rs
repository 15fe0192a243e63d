//! Event records
//!
//! Immutable facts produced by the write path. The engine only reads them;
//! validation of who may submit what happened upstream.

use serde::{Deserialize, Serialize};

/// One sales transaction submitted by a PC in the field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// Event instant (Unix millis)
    pub timestamp_ms: i64,
    /// Zone-local calendar day, `YYYY-MM-DD`
    pub day_key: String,
    pub store_name: String,
    pub employee_name: String,
    pub product_name: String,
    pub product_code: String,
    /// Free-text packaging unit as entered ("กล่อง", "แพ็ค", "ซอง", ...)
    pub unit_label: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    pub status: String,
}

impl SalesRecord {
    /// Dimension key for product grouping: `code::name`
    pub fn product_key(&self) -> String {
        format!("{}::{}", self.product_code, self.product_name)
    }
}

/// Attendance check-in / check-out direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    CheckIn,
    CheckOut,
}

/// One attendance event submitted by a PC
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Event instant (Unix millis)
    pub timestamp_ms: i64,
    /// Zone-local calendar day, `YYYY-MM-DD`
    pub day_key: String,
    pub store_name: String,
    pub employee_name: String,
    pub status: AttendanceStatus,
}

/// Unified event stream entry, used by the historical event log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EventRecord {
    Sale(SalesRecord),
    Attendance(AttendanceRecord),
}

impl EventRecord {
    pub fn timestamp_ms(&self) -> i64 {
        match self {
            EventRecord::Sale(r) => r.timestamp_ms,
            EventRecord::Attendance(r) => r.timestamp_ms,
        }
    }

    pub fn day_key(&self) -> &str {
        match self {
            EventRecord::Sale(r) => &r.day_key,
            EventRecord::Attendance(r) => &r.day_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_key_combines_code_and_name() {
        let record = SalesRecord {
            timestamp_ms: 0,
            day_key: "2025-01-05".into(),
            store_name: "Store X".into(),
            employee_name: "A".into(),
            product_name: "Milk".into(),
            product_code: "P-001".into(),
            unit_label: "กล่อง".into(),
            quantity: 2.0,
            unit_price: 50.0,
            total: 100.0,
            status: "completed".into(),
        };
        assert_eq!(record.product_key(), "P-001::Milk");
    }

    #[test]
    fn attendance_status_wire_format_is_kebab_case() {
        let json = serde_json::to_string(&AttendanceStatus::CheckIn).unwrap();
        assert_eq!(json, "\"check-in\"");
        let back: AttendanceStatus = serde_json::from_str("\"check-out\"").unwrap();
        assert_eq!(back, AttendanceStatus::CheckOut);
    }
}
