use crate::{config::AppConfig, core::auth::SimulatedBackend};

/// State shared by every screen for the lifetime of the application.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub backend: SimulatedBackend,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            backend: SimulatedBackend::with_latency(config.latency),
            config,
        }
    }
}
