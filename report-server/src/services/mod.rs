//! Report orchestration
//!
//! [`ReportService`] is the seam between I/O and the pure engine: it
//! computes the fetch window, pulls a snapshot through the source chain,
//! honors cancellation, then hands the records to the assemblers. Once
//! aggregation starts it runs to completion — it is cheap CPU work and not
//! worth interrupting mid-pass.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use shared::models::DateRange;
use shared::models::report::{DashboardSnapshot, RoiReport, SalesComparison, SalesReport};
use shared::{AppError, AppResult};

use crate::engine::Calendar;
use crate::engine::reports::comparison::{self, ComparisonParams};
use crate::engine::reports::dashboard::{self, DashboardParams};
use crate::engine::reports::roi::{self, RoiParams};
use crate::engine::reports::sales::{self, SalesParams};
use crate::source::{FallbackChain, FetchQuery, Snapshot};

#[derive(Clone)]
pub struct ReportService {
    chain: Arc<FallbackChain>,
    cal: Calendar,
}

impl ReportService {
    pub fn new(chain: Arc<FallbackChain>, cal: Calendar) -> Self {
        Self { chain, cal }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.cal
    }

    /// Fetch a snapshot, racing the caller's cancellation token. A caller
    /// that navigates away cancels the fetch; aggregation never starts on
    /// a cancelled request's results.
    async fn fetch(&self, query: FetchQuery, cancel: &CancellationToken) -> AppResult<Snapshot> {
        let snapshot = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Report request cancelled during fetch");
                return Err(AppError::Cancelled);
            }
            result = self.chain.snapshot(&query) => result?,
        };
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        Ok(snapshot)
    }

    pub async fn dashboard(
        &self,
        params: DashboardParams,
        cancel: CancellationToken,
    ) -> AppResult<DashboardSnapshot> {
        let today = self.cal.today();
        let start = dashboard::fetch_start(&params, today);
        let query = FetchQuery {
            start_ms: self.cal.day_start_ms(start),
            end_ms: self.cal.day_end_ms(today),
            store: params.store.clone(),
            employee: params.employee.clone(),
        };
        let snapshot = self.fetch(query, &cancel).await?;
        Ok(dashboard::assemble(
            &params,
            &snapshot.sales,
            &snapshot.attendance,
            snapshot.fidelity,
            &self.cal,
            today,
        ))
    }

    pub async fn sales_report(
        &self,
        params: SalesParams,
        cancel: CancellationToken,
    ) -> AppResult<SalesReport> {
        let query = range_query(&params.ranges, &params.filter.store, &params.filter.employee);
        let snapshot = self.fetch(query, &cancel).await?;
        Ok(sales::assemble(
            &params,
            &snapshot.sales,
            snapshot.fidelity,
            &self.cal,
        ))
    }

    pub async fn comparison(
        &self,
        params: ComparisonParams,
        cancel: CancellationToken,
    ) -> AppResult<SalesComparison> {
        // The matrix needs both the selected ranges and the 12-month span
        let months = comparison::month_window(&self.cal, params.anchor);
        let mut query = range_query(&params.ranges, &params.filter.store, &params.filter.employee);
        query.start_ms = query.start_ms.min(months.start_ms);
        query.end_ms = query.end_ms.max(months.end_ms);
        let snapshot = self.fetch(query, &cancel).await?;
        Ok(comparison::assemble(
            &params,
            &snapshot.sales,
            snapshot.fidelity,
            &self.cal,
        ))
    }

    pub async fn roi(
        &self,
        params: RoiParams,
        cancel: CancellationToken,
    ) -> AppResult<RoiReport> {
        if params.employee.trim().is_empty() {
            return Err(AppError::validation("ROI report requires an employee"));
        }
        let query = range_query(&params.ranges, &params.filter.store, &Some(params.employee.clone()));
        let snapshot = self.fetch(query, &cancel).await?;
        roi::assemble(&params, &snapshot.sales, snapshot.fidelity, &self.cal)
    }
}

/// Server-side fetch window spanning the union of the ranges
fn range_query(
    ranges: &[DateRange],
    store: &Option<String>,
    employee: &Option<String>,
) -> FetchQuery {
    let start_ms = ranges.iter().map(|r| r.start_ms).min().unwrap_or(0);
    let end_ms = ranges.iter().map(|r| r.end_ms).max().unwrap_or(0);
    FetchQuery {
        start_ms,
        end_ms,
        store: store.clone(),
        employee: employee.clone(),
    }
}

pub use crate::engine::reports::dashboard::DashboardPeriod;
