//! The per-account automation loop.

use std::sync::Arc;
use std::time::Duration;

use okpets_core::types::{AccountId, SessionCredentials};
use tokio_util::sync::CancellationToken;

use crate::actions::ActionSpec;
use crate::client::ActionClient;

/// Replays the action program for one account until cancelled.
///
/// Owns its credential set exclusively; nothing else touches it after
/// handoff. A stopped sequencer is terminal — restarting an account means
/// creating a fresh instance.
pub struct Sequencer {
    account: AccountId,
    creds: SessionCredentials,
    spec: Arc<ActionSpec>,
    client: Arc<dyn ActionClient>,
}

impl Sequencer {
    pub fn new(
        account: AccountId,
        creds: SessionCredentials,
        spec: Arc<ActionSpec>,
        client: Arc<dyn ActionClient>,
    ) -> Self {
        Self {
            account,
            creds,
            spec,
            client,
        }
    }

    /// Run cycles until the token is cancelled.
    ///
    /// Cancellation is observed at the top of each cycle and at every
    /// pacing delay, so it takes effect within one pacing interval rather
    /// than after the full cycle. Failed actions are logged and the loop
    /// carries on — only cancellation exits.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!("🐾 autopilot loop started for {}", self.account);
        loop {
            if cancel.is_cancelled() {
                break;
            }
            for phase in &self.spec.phases {
                for endpoint in phase.calls() {
                    let outcome = self.client.visit(&endpoint, &self.creds).await;
                    if !outcome.success {
                        tracing::warn!(
                            "⚠️ action '{}' failed for {}: {} (continuing)",
                            endpoint,
                            self.account,
                            outcome.detail
                        );
                    }
                    if !pace(&cancel, self.spec.pace).await {
                        tracing::info!("🛑 autopilot loop stopped for {}", self.account);
                        return;
                    }
                }
            }
            tracing::debug!("cycle complete for {}, resting", self.account);
            if !pace(&cancel, self.spec.cycle_rest).await {
                break;
            }
        }
        tracing::info!("🛑 autopilot loop stopped for {}", self.account);
    }
}

/// Sleep for `delay`, waking early on cancellation.
/// Returns false when the sleep was interrupted by a cancel.
async fn pace(cancel: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
