//! Report API handlers
//!
//! Query parsing lives here: comma-separated range lists, `HH:MM` time
//! bounds and `YYYY-MM` month anchors are validated at the edge so the
//! engine only ever sees normalized inputs.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use shared::models::DateRange;
use shared::models::report::{ExpenseEntry, RoiReport, SalesComparison, SalesReport};
use shared::{AppError, AppResult};

use crate::core::ServerState;
use crate::engine::aggregate::Granularity;
use crate::engine::filter::RecordFilter;
use crate::engine::range::{self, RangeInput};
use crate::engine::reports::comparison::ComparisonParams;
use crate::engine::reports::roi::RoiParams;
use crate::engine::reports::sales::{self, SalesParams};
use crate::utils::time::{parse_hhmm, parse_month};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reports/sales", get(get_sales_report))
        .route("/api/reports/comparison", get(get_comparison))
        .route("/api/reports/roi", post(post_roi))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportQuery {
    pub ranges: Option<String>,
    pub group_by: Option<String>,
    pub employee: Option<String>,
    pub store: Option<String>,
    pub status: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// GET /api/reports/sales?ranges=2025-01-01:2025-01-31&groupBy=daily&...
async fn get_sales_report(
    State(state): State<ServerState>,
    Query(query): Query<SalesReportQuery>,
) -> AppResult<Json<SalesReport>> {
    let ranges = parse_ranges(query.ranges.as_deref(), &state);
    let group_by = match query.group_by.as_deref() {
        None => Granularity::Daily,
        Some(raw) => Granularity::parse(raw)
            .ok_or_else(|| AppError::validation(format!("Unknown groupBy: {raw}")))?,
    };

    let mut filter = RecordFilter::new(ranges.clone());
    filter.employee = query.employee;
    filter.store = query.store;
    filter.status = query.status;
    filter.time_from = query.time_from.as_deref().map(parse_hhmm).transpose()?;
    filter.time_to = query.time_to.as_deref().map(parse_hhmm).transpose()?;

    let params = SalesParams {
        ranges,
        filter,
        group_by,
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(sales::DEFAULT_PAGE_SIZE),
    };

    let report = state
        .reports
        .sales_report(params, CancellationToken::new())
        .await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    pub ranges: Option<String>,
    pub store: Option<String>,
    pub employee: Option<String>,
    /// `YYYY-MM`, last month of the matrix; defaults to the current month
    pub month: Option<String>,
}

/// GET /api/reports/comparison?ranges=...&month=2025-06
async fn get_comparison(
    State(state): State<ServerState>,
    Query(query): Query<ComparisonQuery>,
) -> AppResult<Json<SalesComparison>> {
    let ranges = parse_ranges(query.ranges.as_deref(), &state);
    let anchor = match query.month.as_deref() {
        Some(raw) => parse_month(raw)?,
        None => state.reports.calendar().today(),
    };

    let mut filter = RecordFilter::new(ranges.clone());
    filter.store = query.store;
    filter.employee = query.employee;

    let params = ComparisonParams {
        ranges,
        filter,
        anchor,
    };

    let report = state
        .reports
        .comparison(params, CancellationToken::new())
        .await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiRequest {
    pub employee: String,
    #[serde(default)]
    pub ranges: Vec<RangeInput>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    pub store: Option<String>,
}

/// POST /api/reports/roi with `{ employee, ranges, expenses }`
async fn post_roi(
    State(state): State<ServerState>,
    Json(body): Json<RoiRequest>,
) -> AppResult<Json<RoiReport>> {
    let ranges = range::normalize(&body.ranges, state.reports.calendar());

    let mut filter = RecordFilter::new(ranges.clone());
    filter.store = body.store;

    let params = RoiParams {
        employee: body.employee,
        ranges,
        filter,
        expenses: body.expenses,
    };

    let report = state.reports.roi(params, CancellationToken::new()).await?;
    Ok(Json(report))
}

/// Parse and normalize a `ranges` query value; absent or fully malformed
/// input falls back to the default trailing window.
fn parse_ranges(raw: Option<&str>, state: &ServerState) -> Vec<DateRange> {
    let inputs = raw.map(range::parse_range_list).unwrap_or_default();
    range::normalize(&inputs, state.reports.calendar())
}
