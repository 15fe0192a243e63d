//! Historical event-log source
//!
//! Secondary, lower-fidelity provider: an append-only JSONL file of
//! [`EventRecord`] lines kept for audit purposes. The log predates unit
//! capture, so sale entries carry no usable unit label — everything read
//! from here classifies as `piece`, which is why this source declares
//! [`DataFidelity::UnitAgnostic`].

use std::path::PathBuf;

use async_trait::async_trait;
use shared::models::report::DataFidelity;
use shared::models::{AttendanceRecord, EventRecord, SalesRecord};
use shared::{AppError, AppResult};

use super::{FetchQuery, RecordSource};

pub struct EventLogSource {
    path: PathBuf,
}

impl EventLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse every log line; malformed lines are skipped, the
    /// rest of the log still serves the request
    async fn read_events(&self) -> AppResult<Vec<EventRecord>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::upstream(format!(
                "event log {} unreadable: {e}",
                self.path.display()
            ))
        })?;

        let mut events = Vec::new();
        let mut malformed: u64 = 0;
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<EventRecord>(line) {
                Ok(event) => events.push(event),
                Err(_) => malformed += 1,
            }
        }
        if malformed > 0 {
            tracing::debug!(malformed, path = %self.path.display(), "Skipped malformed event-log lines");
        }
        Ok(events)
    }
}

#[async_trait]
impl RecordSource for EventLogSource {
    fn name(&self) -> &'static str {
        "event-log"
    }

    fn fidelity(&self) -> DataFidelity {
        DataFidelity::UnitAgnostic
    }

    async fn fetch_sales(&self, query: &FetchQuery) -> AppResult<Vec<SalesRecord>> {
        let sales = self
            .read_events()
            .await?
            .into_iter()
            .filter_map(|event| match event {
                EventRecord::Sale(mut record)
                    if query.matches_window(record.timestamp_ms)
                        && query.matches_names(&record.store_name, &record.employee_name) =>
                {
                    // Unit labels in the log are unreliable legacy text;
                    // clear them so classification degrades uniformly.
                    record.unit_label.clear();
                    Some(record)
                }
                _ => None,
            })
            .collect();
        Ok(sales)
    }

    async fn fetch_attendance(&self, query: &FetchQuery) -> AppResult<Vec<AttendanceRecord>> {
        let attendance = self
            .read_events()
            .await?
            .into_iter()
            .filter_map(|event| match event {
                EventRecord::Attendance(record)
                    if query.matches_window(record.timestamp_ms)
                        && query.matches_names(&record.store_name, &record.employee_name) =>
                {
                    Some(record)
                }
                _ => None,
            })
            .collect();
        Ok(attendance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sale_line(ts: i64, total: f64) -> String {
        format!(
            concat!(
                r#"{{"kind":"sale","timestampMs":{ts},"dayKey":"2025-01-05","storeName":"Store X","#,
                r#""employeeName":"A","productName":"Milk","productCode":"P-001","unitLabel":"กล่อง","#,
                r#""quantity":1.0,"unitPrice":{total},"total":{total},"status":"completed"}}"#
            ),
            ts = ts,
            total = total
        )
    }

    fn attendance_line(ts: i64) -> String {
        format!(
            concat!(
                r#"{{"kind":"attendance","timestampMs":{ts},"dayKey":"2025-01-05","#,
                r#""storeName":"Store X","employeeName":"A","status":"check-in"}}"#
            ),
            ts = ts
        )
    }

    fn write_log(lines: &[String]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn query(start: i64, end: i64) -> FetchQuery {
        FetchQuery {
            start_ms: start,
            end_ms: end,
            store: None,
            employee: None,
        }
    }

    #[tokio::test]
    async fn reads_window_and_strips_unit_labels() {
        let log = write_log(&[
            sale_line(1_000, 100.0),
            sale_line(50_000, 200.0), // outside window
            attendance_line(2_000),
        ]);
        let source = EventLogSource::new(log.path());

        let sales = source.fetch_sales(&query(0, 10_000)).await.unwrap();
        assert_eq!(sales.len(), 1);
        assert!(sales[0].unit_label.is_empty());
        assert_eq!(sales[0].total, 100.0);

        let attendance = source.fetch_attendance(&query(0, 10_000)).await.unwrap();
        assert_eq!(attendance.len(), 1);
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped() {
        let log = write_log(&[
            "not json at all".to_string(),
            sale_line(1_000, 100.0),
            r#"{"kind":"sale","broken":true}"#.to_string(),
        ]);
        let source = EventLogSource::new(log.path());
        let sales = source.fetch_sales(&query(0, 10_000)).await.unwrap();
        assert_eq!(sales.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_an_upstream_error() {
        let source = EventLogSource::new("/nonexistent/events.jsonl");
        let err = source.fetch_sales(&query(0, 10_000)).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
