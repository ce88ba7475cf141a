use std::time::Duration;

use crate::core::{auth::SIMULATED_LATENCY, seed::Seed};

/// Everything the application shell needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub seed: Seed,
    /// Show a "back" affordance on the dashboard that returns to sign-in.
    pub allow_back: bool,
    /// Open straight on the dashboard.
    pub skip_auth: bool,
    /// Delay of every simulated auth request.
    pub latency: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: Seed::default(),
            allow_back: false,
            skip_auth: false,
            latency: SIMULATED_LATENCY,
        }
    }
}
