use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3100 | HTTP API port |
/// | TIMEZONE | Asia/Bangkok | Business timezone |
/// | RECORD_STORE_URL | http://localhost:4000 | Primary record-store API |
/// | RECORD_STORE_TIMEOUT_MS | 10000 | Record-store request timeout |
/// | EVENT_LOG_PATH | /var/lib/pc-report/events.jsonl | Fallback event log |
/// | DASHBOARD_TREND_DAYS | 30 | Rolling dashboard timeline width |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | (unset) | Optional rolling log-file directory |
/// | ENVIRONMENT | development | development \| staging \| production |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Business timezone for all calendar bucketing
    pub timezone: Tz,
    /// Primary record-store base URL
    pub record_store_url: String,
    /// Record-store request timeout (milliseconds)
    pub record_store_timeout_ms: u64,
    /// Historical event log used when the record store is unreachable
    pub event_log_path: String,
    /// Default width of the dashboard's rolling daily timeline
    pub dashboard_trend_days: u32,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Optional directory for daily-rolling log files
    pub log_dir: Option<String>,
    /// Execution environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3100),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|raw| match raw.parse::<Tz>() {
                    Ok(tz) => Some(tz),
                    Err(_) => {
                        tracing::warn!(
                            "Invalid TIMEZONE '{}', falling back to Asia/Bangkok",
                            raw
                        );
                        None
                    }
                })
                .unwrap_or(Tz::Asia__Bangkok),
            record_store_url: std::env::var("RECORD_STORE_URL")
                .unwrap_or_else(|_| "http://localhost:4000".into()),
            record_store_timeout_ms: std::env::var("RECORD_STORE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10_000),
            event_log_path: std::env::var("EVENT_LOG_PATH")
                .unwrap_or_else(|_| "/var/lib/pc-report/events.jsonl".into()),
            dashboard_trend_days: std::env::var("DASHBOARD_TREND_DAYS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
