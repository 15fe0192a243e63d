//! Shared types for the PC reporting backend
//!
//! # Modules
//!
//! - **models** (`models`): event records, unit categories, report shapes
//! - **error** (`error`): unified `AppError` / `AppResponse` types
//!
//! These types sit on the wire between the record store, the reporting
//! engine and the request layer, so everything here is serde-serializable
//! and free of engine logic.

pub mod error;
pub mod models;

pub use error::{AppError, AppResponse, AppResult};
pub use models::{
    AggregationCell, AttendanceRecord, AttendanceStatus, DateRange, EventRecord, SalesRecord,
    UnitCategory,
};
