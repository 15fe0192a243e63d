//! PC Report Server - back-office reporting for a field sales force
//!
//! # Architecture
//!
//! Raw attendance and sales events come from the record store; this server
//! turns them into dashboards, a paginated sales report, a 12-month
//! sales-comparison matrix and a per-employee ROI report. Every report is a
//! stateless transform over a freshly fetched snapshot.
//!
//! # Module structure
//!
//! ```text
//! report-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── engine/        # Calendar, ranges, filter, aggregation, metrics, reports
//! ├── source/        # Record-source trait, HTTP store, event-log fallback
//! ├── services/      # Report orchestration (fetch + cancellation)
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Logger, time parsing
//! ```

pub mod api;
pub mod core;
pub mod engine;
pub mod services;
pub mod source;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use services::ReportService;
pub use shared::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging from the resulting environment
pub fn setup_environment() {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
