//! Utility modules
//!
//! - [`logger`] - tracing subscriber setup
//! - [`time`] - request-layer time parsing helpers

pub mod logger;
pub mod time;

pub use shared::{AppError, AppResult};
