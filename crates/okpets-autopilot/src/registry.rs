//! Task registry — at most one running automation loop per account.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use okpets_core::types::{AccountId, SessionCredentials};
use thiserror::Error;

use crate::actions::ActionSpec;
use crate::client::ActionClient;
use crate::runtime::{SchedulerRuntime, TaskHandle};
use crate::sequencer::Sequencer;

/// Expected, recoverable start/stop outcomes — relayed to the user as
/// chat text, never treated as failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutopilotError {
    #[error("automation is already running for account {0}")]
    AlreadyRunning(AccountId),
    #[error("no automation is running for account {0}")]
    NotRunning(AccountId),
}

/// Shared account → handle table with thread-safe start/stop semantics.
///
/// The table is the only state touched from multiple contexts; every
/// operation serializes on one lock, which also makes check-then-insert
/// atomic with respect to concurrent starts for the same account.
pub struct TaskRegistry {
    runtime: Arc<SchedulerRuntime>,
    client: Arc<dyn ActionClient>,
    spec: Arc<ActionSpec>,
    tasks: Mutex<HashMap<AccountId, TaskHandle>>,
}

impl TaskRegistry {
    pub fn new(
        runtime: Arc<SchedulerRuntime>,
        client: Arc<dyn ActionClient>,
        spec: Arc<ActionSpec>,
    ) -> Self {
        Self {
            runtime,
            client,
            spec,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Schedule a fresh loop for `account`, rejecting duplicates.
    pub fn start(
        &self,
        account: AccountId,
        creds: SessionCredentials,
    ) -> Result<TaskHandle, AutopilotError> {
        let mut tasks = self.tasks.lock().unwrap();
        if tasks.contains_key(&account) {
            return Err(AutopilotError::AlreadyRunning(account));
        }

        let sequencer = Sequencer::new(
            account.clone(),
            creds,
            Arc::clone(&self.spec),
            Arc::clone(&self.client),
        );
        let handle = self.runtime.schedule(move |cancel| sequencer.run(cancel));
        tasks.insert(account.clone(), handle.clone());
        tracing::info!("🤖 autopilot enabled for account {account}");
        Ok(handle)
    }

    /// Remove the entry, then cancel its loop. Removal happens under the
    /// same lock a concurrent start would take, so a racing start can
    /// never observe a dead-but-present entry.
    pub fn stop(&self, account: &AccountId) -> Result<(), AutopilotError> {
        let handle = self
            .tasks
            .lock()
            .unwrap()
            .remove(account)
            .ok_or_else(|| AutopilotError::NotRunning(account.clone()))?;
        handle.cancel();
        tracing::info!("🛑 autopilot disabled for account {account}");
        Ok(())
    }

    pub fn is_running(&self, account: &AccountId) -> bool {
        self.tasks.lock().unwrap().contains_key(account)
    }

    pub fn running_count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    /// Shutdown drain: cancel and forget every running loop.
    pub fn stop_all(&self) {
        let mut tasks = self.tasks.lock().unwrap();
        let count = tasks.len();
        for (_, handle) in tasks.drain() {
            handle.cancel();
        }
        if count > 0 {
            tracing::info!("🛑 drained {count} autopilot task(s)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Outcome;
    use async_trait::async_trait;
    use okpets_core::types::SessionCredentials;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingClient {
        cookies: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl ActionClient for RecordingClient {
        async fn visit(&self, _endpoint: &str, creds: &SessionCredentials) -> Outcome {
            self.cookies.lock().unwrap().push(creds.cookie_header());
            Outcome::ok(reqwest::StatusCode::OK)
        }
    }

    fn registry(client: Arc<RecordingClient>) -> (Arc<SchedulerRuntime>, TaskRegistry) {
        let runtime = Arc::new(SchedulerRuntime::start().unwrap());
        let registry = TaskRegistry::new(
            Arc::clone(&runtime),
            client,
            Arc::new(ActionSpec::standard()),
        );
        (runtime, registry)
    }

    fn creds(tag: &str) -> SessionCredentials {
        let mut c = SessionCredentials::new();
        c.set("session", tag);
        c
    }

    fn wait_until(timeout: Duration, check: impl Fn() -> bool) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        while std::time::Instant::now() < deadline {
            if check() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn test_double_start_is_rejected() {
        let (runtime, registry) = registry(Arc::new(RecordingClient::default()));
        let account = AccountId::from("u1");

        assert!(registry.start(account.clone(), creds("a")).is_ok());
        let err = registry.start(account.clone(), creds("a")).unwrap_err();
        assert_eq!(err, AutopilotError::AlreadyRunning(account.clone()));
        assert_eq!(registry.running_count(), 1);

        registry.stop_all();
        runtime.shutdown();
    }

    #[test]
    fn test_stop_without_start_is_not_running() {
        let (runtime, registry) = registry(Arc::new(RecordingClient::default()));
        let account = AccountId::from("never");
        assert_eq!(
            registry.stop(&account),
            Err(AutopilotError::NotRunning(account))
        );
        runtime.shutdown();
    }

    #[test]
    fn test_start_stop_start_leaves_no_stale_entry() {
        let (runtime, registry) = registry(Arc::new(RecordingClient::default()));
        let account = AccountId::from("u1");

        let handle = registry.start(account.clone(), creds("a")).unwrap();
        assert!(registry.is_running(&account));

        registry.stop(&account).unwrap();
        assert!(!registry.is_running(&account));
        assert!(handle.is_cancelled());

        assert!(registry.start(account.clone(), creds("a")).is_ok());
        assert!(registry.is_running(&account));

        registry.stop_all();
        runtime.shutdown();
    }

    #[test]
    fn test_distinct_accounts_run_independently() {
        let client = Arc::new(RecordingClient::default());
        let (runtime, registry) = registry(Arc::clone(&client));

        registry.start(AccountId::from("alice"), creds("alice")).unwrap();
        registry.start(AccountId::from("bob"), creds("bob")).unwrap();
        assert_eq!(registry.running_count(), 2);

        // Both loops issue their first call immediately, each with its own
        // credential set.
        assert!(wait_until(Duration::from_secs(2), || {
            let seen = client.cookies.lock().unwrap();
            seen.iter().any(|c| c.as_deref() == Some("session=alice"))
                && seen.iter().any(|c| c.as_deref() == Some("session=bob"))
        }));

        registry.stop_all();
        assert_eq!(registry.running_count(), 0);
        runtime.shutdown();
    }
}
