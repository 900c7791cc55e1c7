use std::sync::Arc;

use crate::backend_client::GenerationBackend;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable backend. Default: `HttpBackend`; tests swap in a fake.
    pub backend: Arc<dyn GenerationBackend>,
}

impl AppState {
    pub fn default_backend_url(&self) -> Option<&str> {
        self.config.backend_url.as_deref()
    }
}
