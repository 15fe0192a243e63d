//! Domain models
//!
//! # Modules
//!
//! - [`event`] - raw sales / attendance event records (record-store rows)
//! - [`unit`] - unit-label classification into canonical categories
//! - [`range`] - normalized half-open date ranges
//! - [`cell`] - aggregation accumulators and derived metric views
//! - [`report`] - wire shapes for the four report responses

pub mod cell;
pub mod event;
pub mod range;
pub mod report;
pub mod unit;

pub use cell::{AggregationCell, DerivedMetric};
pub use event::{AttendanceRecord, AttendanceStatus, EventRecord, SalesRecord};
pub use range::DateRange;
pub use unit::UnitCategory;
