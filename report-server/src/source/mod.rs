//! Record sources
//!
//! The engine never talks to storage directly: it asks a [`RecordSource`]
//! for a snapshot of matching rows. The primary source is the record
//! store's HTTP API; when it is unreachable the [`FallbackChain`] degrades
//! to the historical event log — lower fidelity (no unit labels), but the
//! report still renders. Only when both sources fail does the request
//! surface a retryable error.

mod event_log;
mod http_store;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::report::DataFidelity;
use shared::models::{AttendanceRecord, SalesRecord};
use shared::{AppError, AppResult};

pub use event_log::EventLogSource;
pub use http_store::HttpRecordStore;
pub use memory::MemorySource;

/// Server-side filter pushed down to the source
#[derive(Debug, Clone, Default)]
pub struct FetchQuery {
    /// Inclusive lower bound (Unix millis)
    pub start_ms: i64,
    /// Exclusive upper bound (Unix millis)
    pub end_ms: i64,
    pub store: Option<String>,
    pub employee: Option<String>,
}

impl FetchQuery {
    pub fn matches_window(&self, ts: i64) -> bool {
        ts >= self.start_ms && ts < self.end_ms
    }

    pub fn matches_names(&self, store: &str, employee: &str) -> bool {
        let store_ok = self
            .store
            .as_ref()
            .is_none_or(|wanted| wanted.to_lowercase() == store.to_lowercase());
        let employee_ok = self
            .employee
            .as_ref()
            .is_none_or(|wanted| wanted.to_lowercase() == employee.to_lowercase());
        store_ok && employee_ok
    }
}

/// One provider of raw event rows
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Declared capability of this source
    fn fidelity(&self) -> DataFidelity;

    async fn fetch_sales(&self, query: &FetchQuery) -> AppResult<Vec<SalesRecord>>;

    async fn fetch_attendance(&self, query: &FetchQuery) -> AppResult<Vec<AttendanceRecord>>;
}

/// Immutable per-request snapshot, tagged with the fidelity that served it
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub sales: Vec<SalesRecord>,
    pub attendance: Vec<AttendanceRecord>,
    pub fidelity: DataFidelity,
}

/// Primary source with a declared lower-fidelity fallback
pub struct FallbackChain {
    primary: Arc<dyn RecordSource>,
    secondary: Arc<dyn RecordSource>,
}

impl FallbackChain {
    pub fn new(primary: Arc<dyn RecordSource>, secondary: Arc<dyn RecordSource>) -> Self {
        Self { primary, secondary }
    }

    /// Fetch a snapshot, falling back on primary failure
    pub async fn snapshot(&self, query: &FetchQuery) -> AppResult<Snapshot> {
        match self.fetch_from(self.primary.as_ref(), query).await {
            Ok(snapshot) => Ok(snapshot),
            Err(primary_err) => {
                tracing::warn!(
                    source = self.primary.name(),
                    error = %primary_err,
                    "Primary record source failed, falling back"
                );
                self.fetch_from(self.secondary.as_ref(), query)
                    .await
                    .map_err(|secondary_err| {
                        AppError::upstream(format!(
                            "{}: {primary_err}; {}: {secondary_err}",
                            self.primary.name(),
                            self.secondary.name(),
                        ))
                    })
            }
        }
    }

    async fn fetch_from(&self, source: &dyn RecordSource, query: &FetchQuery) -> AppResult<Snapshot> {
        let sales = source.fetch_sales(query).await?;
        let attendance = source.fetch_attendance(query).await?;
        Ok(Snapshot {
            sales,
            attendance,
            fidelity: source.fidelity(),
        })
    }
}
