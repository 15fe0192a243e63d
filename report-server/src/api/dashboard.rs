//! Dashboard API handlers

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use shared::models::report::DashboardSnapshot;
use shared::{AppError, AppResult};

use crate::core::ServerState;
use crate::engine::reports::dashboard::{DashboardParams, DashboardPeriod};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub period: Option<String>,
    pub store: Option<String>,
    pub employee: Option<String>,
    #[serde(rename = "trendDays")]
    pub trend_days: Option<u32>,
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(get_dashboard))
}

/// GET /api/dashboard?period=today|week|month|year&store=&employee=
async fn get_dashboard(
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardSnapshot>> {
    let period = match query.period.as_deref() {
        None => DashboardPeriod::Today,
        Some(raw) => DashboardPeriod::parse(raw)
            .ok_or_else(|| AppError::validation(format!("Unknown period: {raw}")))?,
    };

    let params = DashboardParams {
        period,
        store: query.store,
        employee: query.employee,
        trend_days: query
            .trend_days
            .unwrap_or(state.config.dashboard_trend_days),
    };

    tracing::debug!(period = period.as_str(), "Assembling dashboard snapshot");

    let snapshot = state
        .reports
        .dashboard(params, CancellationToken::new())
        .await?;
    Ok(Json(snapshot))
}
