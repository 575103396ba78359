//! Change events sent from a dispatch pass to the history tracker

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::target::{CheckId, TargetId};

/// "Record that this target of this check was just notified"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub service_id: CheckId,
    pub notification_id: TargetId,
}

/// One-way publisher of [`ChangeEvent`]s.
///
/// Backed by a bounded channel. `publish` waits for capacity with no timeout,
/// so a receiver that stops draining stalls the dispatch pass that publishes.
#[derive(Debug, Clone)]
pub struct ChangePublisher {
    tx: mpsc::Sender<ChangeEvent>,
}

impl ChangePublisher {
    pub fn new(tx: mpsc::Sender<ChangeEvent>) -> Self {
        Self { tx }
    }

    /// Create a publisher together with the receiving end
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ChangeEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    /// Publish an event. If the receiver is gone the event is dropped with a warning.
    pub async fn publish(&self, event: ChangeEvent) {
        if self.tx.send(event).await.is_err() {
            tracing::warn!(
                "Change receiver closed, dropping event for serviceID {}, notificationID {}",
                event.service_id,
                event.notification_id
            );
        }
    }
}
