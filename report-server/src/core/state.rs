use std::sync::Arc;

use crate::core::Config;
use crate::engine::Calendar;
use crate::services::ReportService;
use crate::source::{EventLogSource, FallbackChain, HttpRecordStore, RecordSource};

/// Shared application state
///
/// Cloned per request; everything inside is `Arc`-backed. The engine
/// itself is stateless, so there is nothing mutable to coordinate here —
/// concurrent reports run fully in parallel.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub reports: ReportService,
}

impl ServerState {
    /// Wire the default source chain: record store with event-log fallback
    pub fn initialize(config: &Config) -> Self {
        let primary: Arc<dyn RecordSource> = Arc::new(HttpRecordStore::new(
            &config.record_store_url,
            config.record_store_timeout_ms,
        ));
        let secondary: Arc<dyn RecordSource> = Arc::new(EventLogSource::new(&config.event_log_path));
        Self::with_chain(config, FallbackChain::new(primary, secondary))
    }

    /// Build state over an explicit source chain (tests, embedding)
    pub fn with_chain(config: &Config, chain: FallbackChain) -> Self {
        let cal = Calendar::new(config.timezone);
        Self {
            config: Arc::new(config.clone()),
            reports: ReportService::new(Arc::new(chain), cal),
        }
    }
}
