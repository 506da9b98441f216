//! Scheduler runtime — one worker thread for every automation loop.
//!
//! All sequencers run as tokio tasks on a single current-thread runtime
//! owned by a dedicated OS thread, so any number of accounts interleave
//! cooperatively on one worker. Request handlers interact with it only
//! through [`SchedulerRuntime::schedule`] and the [`TaskHandle`]s it
//! returns; both are safe to use from any thread.

use std::future::Future;
use std::sync::Mutex;
use std::sync::mpsc;
use std::thread;

use tokio_util::sync::CancellationToken;

/// Cancellable reference to one scheduled loop.
///
/// Clones share the same underlying token; cancelling any clone requests
/// cooperative termination of the loop at its next suspension point.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    token: CancellationToken,
}

impl TaskHandle {
    /// Request termination. Non-blocking; the loop observes the signal at
    /// its next pacing delay.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// The background execution context.
pub struct SchedulerRuntime {
    handle: tokio::runtime::Handle,
    root: CancellationToken,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl SchedulerRuntime {
    /// Spawn the worker thread and wait for its runtime to come up.
    pub fn start() -> std::io::Result<Self> {
        let root = CancellationToken::new();
        let stay_up = root.clone();
        let (tx, rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("okpets-autopilot".into())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        return;
                    }
                };
                let _ = tx.send(Ok(rt.handle().clone()));
                // Park until shutdown; scheduled tasks run here meanwhile.
                rt.block_on(stay_up.cancelled());
            })?;

        let handle = rx
            .recv()
            .map_err(|_| std::io::Error::other("autopilot worker exited during startup"))??;

        tracing::info!("⚙️ autopilot runtime started");
        Ok(Self {
            handle,
            root,
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Hand a loop to the worker. Callable from any thread; returns
    /// immediately with a cancellation handle.
    ///
    /// The loop receives a child token of the runtime's root token, so a
    /// runtime shutdown cancels every scheduled loop as well.
    pub fn schedule<F, Fut>(&self, f: F) -> TaskHandle
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = self.root.child_token();
        self.handle.spawn(f(token.clone()));
        TaskHandle { token }
    }

    /// Cancel everything and join the worker thread.
    pub fn shutdown(&self) {
        self.root.cancel();
        if let Some(worker) = self.worker.lock().unwrap().take() {
            if worker.join().is_err() {
                tracing::error!("autopilot worker panicked during shutdown");
            } else {
                tracing::info!("⚙️ autopilot runtime stopped");
            }
        }
    }
}

impl Drop for SchedulerRuntime {
    fn drop(&mut self) {
        // Unblocks the worker even if shutdown() was never called.
        self.root.cancel();
    }
}
