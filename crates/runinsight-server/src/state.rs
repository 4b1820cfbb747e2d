//! Shared application state.

use std::time::Instant;

use runinsight_classify::Classifier;
use runinsight_core::ServiceConfig;
use runinsight_store::QuestionStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: ServiceConfig,
    pub store: QuestionStore,
    pub classifier: Classifier,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ServiceConfig, store: QuestionStore) -> Self {
        Self {
            config,
            store,
            classifier: Classifier::default(),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
