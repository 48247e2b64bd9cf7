//! Whole-snapshot persistence for the collection managers.
//!
//! Mutations update in-memory state synchronously and hand the complete new
//! collection to a [`SnapshotWriter`]. The writer owns a single background
//! task that performs the actual `KeyValueStore::set` calls in queue order.
//! Failures are logged and never reach the caller.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, oneshot};

use crate::ports::KeyValueStore;

enum WriterCommand {
    Write { key: String, payload: String },
    Flush(oneshot::Sender<()>),
}

/// Handle to the background snapshot writer.
///
/// Cloning the handle is cheap; every clone feeds the same queue. The worker
/// exits once all handles are dropped and the queue is drained.
#[derive(Clone)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<WriterCommand>,
}

impl SnapshotWriter {
    /// Start the writer task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store, rx));
        Self { tx }
    }

    /// Serialize `value` and queue it as the new snapshot for `key`.
    ///
    /// Returns immediately. The write happens on the worker task.
    pub fn schedule<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to encode snapshot; write skipped");
                return;
            }
        };

        let command = WriterCommand::Write {
            key: key.to_string(),
            payload,
        };
        if self.tx.send(command).is_err() {
            tracing::warn!(key, "Snapshot writer has stopped; write dropped");
        }
    }

    /// Wait until every write scheduled before this call has been attempted.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(WriterCommand::Flush(ack_tx)).is_err() {
            return;
        }
        // A dropped ack means the worker is gone, so there is nothing left to wait for.
        let _ = ack_rx.await;
    }
}

async fn run_writer(
    store: Arc<dyn KeyValueStore>,
    mut rx: mpsc::UnboundedReceiver<WriterCommand>,
) {
    while let Some(first) = rx.recv().await {
        let mut pending: Vec<(String, String)> = Vec::new();
        let mut waiters = Vec::new();

        // Drain whatever is already queued; only the newest payload per key matters.
        let mut next = Some(first);
        while let Some(command) = next {
            match command {
                WriterCommand::Write { key, payload } => {
                    if let Some(slot) = pending.iter_mut().find(|(k, _)| *k == key) {
                        slot.1 = payload;
                    } else {
                        pending.push((key, payload));
                    }
                }
                WriterCommand::Flush(ack) => waiters.push(ack),
            }
            next = rx.try_recv().ok();
        }

        for (key, payload) in pending {
            match store.set(&key, &payload).await {
                Ok(()) => {
                    tracing::debug!(key = %key, bytes = payload.len(), "Snapshot persisted");
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Failed to persist snapshot");
                }
            }
        }

        for ack in waiters {
            let _ = ack.send(());
        }
    }

    tracing::debug!("Snapshot writer stopped");
}

/// Read a list snapshot, failing open to an empty list.
///
/// A missing key, a storage error and an undecodable value all produce an
/// empty list; the latter two are logged.
pub(crate) async fn read_snapshot<T>(store: &dyn KeyValueStore, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
{
    match store.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored snapshot is unreadable; starting empty");
                Vec::new()
            }
        },
        Ok(None) => {
            tracing::debug!(key, "No stored snapshot; starting empty");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read snapshot; starting empty");
            Vec::new()
        }
    }
}
