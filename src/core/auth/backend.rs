use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::core::auth::PendingAction;

/// How long every simulated request takes.
pub const SIMULATED_LATENCY: Duration = Duration::from_secs(1);

/// Carries out an accepted auth request. Validation has already happened
/// by the time an action gets here.
pub trait AuthBackend {
    fn perform(&self, action: &PendingAction) -> impl Future<Output = ()> + Send;
}

/// Stand-in for a real identity service: waits, then succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    latency: Duration,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::with_latency(SIMULATED_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthBackend for SimulatedBackend {
    fn perform(&self, action: &PendingAction) -> impl Future<Output = ()> + Send {
        let latency = self.latency;
        let action = action.clone();
        async move {
            debug!(?action, ?latency, "simulating request");
            tokio::time::sleep(latency).await;
        }
    }
}
