//! In-process record source
//!
//! Backs tests and local development without a record store. Applies the
//! same server-side filtering contract as the real sources.

use async_trait::async_trait;
use shared::AppResult;
use shared::models::report::DataFidelity;
use shared::models::{AttendanceRecord, SalesRecord};

use super::{FetchQuery, RecordSource};

pub struct MemorySource {
    sales: Vec<SalesRecord>,
    attendance: Vec<AttendanceRecord>,
    fidelity: DataFidelity,
}

impl MemorySource {
    pub fn new(sales: Vec<SalesRecord>, attendance: Vec<AttendanceRecord>) -> Self {
        Self {
            sales,
            attendance,
            fidelity: DataFidelity::Full,
        }
    }

    pub fn with_fidelity(mut self, fidelity: DataFidelity) -> Self {
        self.fidelity = fidelity;
        self
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fidelity(&self) -> DataFidelity {
        self.fidelity
    }

    async fn fetch_sales(&self, query: &FetchQuery) -> AppResult<Vec<SalesRecord>> {
        Ok(self
            .sales
            .iter()
            .filter(|r| {
                query.matches_window(r.timestamp_ms)
                    && query.matches_names(&r.store_name, &r.employee_name)
            })
            .cloned()
            .collect())
    }

    async fn fetch_attendance(&self, query: &FetchQuery) -> AppResult<Vec<AttendanceRecord>> {
        Ok(self
            .attendance
            .iter()
            .filter(|r| {
                query.matches_window(r.timestamp_ms)
                    && query.matches_names(&r.store_name, &r.employee_name)
            })
            .cloned()
            .collect())
    }
}
