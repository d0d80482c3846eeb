//! Deferred deletion of served PDF copies.
//!
//! Served artifacts live in the shared temp root under randomized names and
//! are removed by a worker task after a grace period. Handlers buffer the
//! response body before scheduling, so the interval is not load-bearing.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// How long a served copy stays on disk after its response was built.
const CLEANUP_GRACE: Duration = Duration::from_secs(60);

/// Handle to the deferred-deletion worker. Cheap to clone.
#[derive(Clone)]
pub struct CleanupQueue {
    tx: mpsc::UnboundedSender<PathBuf>,
}

impl CleanupQueue {
    /// Spawns the worker task and returns a handle to it.
    pub fn start() -> Self {
        Self::with_grace(CLEANUP_GRACE)
    }

    fn with_grace(grace: Duration) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<PathBuf>();

        tokio::spawn(async move {
            while let Some(path) = rx.recv().await {
                tokio::spawn(async move {
                    tokio::time::sleep(grace).await;
                    match tokio::fs::remove_file(&path).await {
                        Ok(()) => debug!("Removed served artifact {}", path.display()),
                        Err(e) => {
                            warn!("Failed to remove served artifact {}: {e}", path.display())
                        }
                    }
                });
            }
        });

        Self { tx }
    }

    /// Schedules a file for removal. Errors are logged, never propagated —
    /// a leaked temp file must not fail a request that already succeeded.
    pub fn schedule(&self, path: PathBuf) {
        if self.tx.send(path).is_err() {
            warn!("Cleanup worker is gone; served artifact will not be removed");
        }
    }
}
