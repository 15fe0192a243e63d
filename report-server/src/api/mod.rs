//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`dashboard`] - dashboard snapshot endpoint
//! - [`reports`] - sales / comparison / ROI report endpoints

pub mod dashboard;
pub mod health;
pub mod reports;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use shared::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(dashboard::router())
        .merge(reports::router())
}
