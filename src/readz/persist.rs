//! # Debounced saving
//!
//! [`SaveQueue`] writes chapter snapshots in the background. Every submit
//! replaces the pending snapshot and restarts the wait; once `debounce` passes
//! with no new submit, the worker writes whatever is newest. There is a single
//! worker, so writes never overlap and the last snapshot submitted is the last
//! one written.

use crate::commands::save::{self, SaveOutcome};
use crate::commands::CmdResult;
use crate::model::Chapter;
use crate::store::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Result of one background write.
#[derive(Debug)]
pub struct SaveReport {
    pub outcome: SaveOutcome,
    pub result: CmdResult,
}

pub struct SaveQueue {
    pending: watch::Sender<Option<Vec<Chapter>>>,
    reports: mpsc::UnboundedReceiver<SaveReport>,
    worker: JoinHandle<()>,
}

impl SaveQueue {
    /// Starts the worker. Must be called from within a tokio runtime.
    pub fn spawn<S>(store: Arc<S>, key: impl Into<String>, debounce: Duration) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let (pending, rx) = watch::channel(None);
        let (report_tx, reports) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(store, key.into(), debounce, rx, report_tx));
        Self {
            pending,
            reports,
            worker,
        }
    }

    /// Queues `snapshot`, replacing any snapshot not yet written.
    pub fn submit(&self, snapshot: Vec<Chapter>) {
        // send_replace never fails, even with the worker gone
        self.pending.send_replace(Some(snapshot));
    }

    /// Reports of writes that finished since the last call.
    pub fn drain_reports(&mut self) -> Vec<SaveReport> {
        let mut out = Vec::new();
        while let Ok(report) = self.reports.try_recv() {
            out.push(report);
        }
        out
    }

    /// Stops accepting snapshots, waits for the final write, and returns every
    /// report not drained yet.
    pub async fn flush(self) -> Vec<SaveReport> {
        let SaveQueue {
            pending,
            mut reports,
            worker,
        } = self;
        drop(pending);
        if let Err(err) = worker.await {
            warn!(error = %err, "save worker stopped unexpectedly");
        }

        let mut out = Vec::new();
        while let Some(report) = reports.recv().await {
            out.push(report);
        }
        out
    }
}

async fn run_worker<S: KeyValueStore>(
    store: Arc<S>,
    key: String,
    debounce: Duration,
    mut rx: watch::Receiver<Option<Vec<Chapter>>>,
    reports: mpsc::UnboundedSender<SaveReport>,
) {
    // changed() still yields an unseen value after the sender is dropped,
    // so the final snapshot is written before the loop ends
    while rx.changed().await.is_ok() {
        if !debounce.is_zero() {
            wait_for_quiet(&mut rx, debounce).await;
        }
        let Some(snapshot) = rx.borrow_and_update().clone() else {
            continue;
        };

        debug!(count = snapshot.len(), "writing queued snapshot");
        let (outcome, result) = save::run(store.as_ref(), &key, &snapshot).await;
        if reports.send(SaveReport { outcome, result }).is_err() {
            break;
        }
    }
}

/// Returns once `debounce` elapses without a new snapshot, or as soon as the
/// queue is closed.
async fn wait_for_quiet(rx: &mut watch::Receiver<Option<Vec<Chapter>>>, debounce: Duration) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(debounce) => return,
            changed = rx.changed() => {
                if changed.is_err() {
                    return;
                }
            }
        }
    }
}
