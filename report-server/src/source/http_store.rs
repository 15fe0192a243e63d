//! Record-store HTTP client
//!
//! Primary source: the record store exposes the raw rows over REST and
//! applies the date window / name equality filters server-side. Responses
//! are plain JSON arrays of the shared record types.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::models::report::DataFidelity;
use shared::models::{AttendanceRecord, SalesRecord};
use shared::{AppError, AppResult};

use super::{FetchQuery, RecordSource};

pub struct HttpRecordStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRecordStore {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &FetchQuery) -> AppResult<T> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.client.get(&url).query(&[
            ("from", query.start_ms.to_string()),
            ("to", query.end_ms.to_string()),
        ]);
        if let Some(store) = &query.store {
            request = request.query(&[("store", store.as_str())]);
        }
        if let Some(employee) = &query.employee {
            request = request.query(&[("employee", employee.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("record store request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "record store returned {} for {path}",
                response.status()
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::upstream(format!("record store response malformed: {e}")))
    }
}

#[async_trait]
impl RecordSource for HttpRecordStore {
    fn name(&self) -> &'static str {
        "record-store"
    }

    fn fidelity(&self) -> DataFidelity {
        DataFidelity::Full
    }

    async fn fetch_sales(&self, query: &FetchQuery) -> AppResult<Vec<SalesRecord>> {
        self.get("/api/records/sales", query).await
    }

    async fn fetch_attendance(&self, query: &FetchQuery) -> AppResult<Vec<AttendanceRecord>> {
        self.get("/api/records/attendance", query).await
    }
}
