//! Owner of the sent history of every check
//!
//! Dispatch passes never write the history. They publish [`ChangeEvent`]s and
//! the tracker applies them here, stamping the time the event was received.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, RwLock};

use crate::publisher::ChangeEvent;
use crate::target::{CheckId, SentHistory};

/// Sent history of all checks
#[derive(Debug, Default)]
pub struct HistoryBook {
    checks: HashMap<CheckId, SentHistory>,
}

impl HistoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the event's target was notified at `at`
    pub fn record(&mut self, event: ChangeEvent, at: DateTime<Utc>) {
        self.checks
            .entry(event.service_id)
            .or_default()
            .insert(event.notification_id, at);
    }

    /// Copy of one check's history, empty if the check has none
    pub fn snapshot(&self, check_id: CheckId) -> SentHistory {
        self.checks.get(&check_id).cloned().unwrap_or_default()
    }

    /// Forget everything recorded for a check
    pub fn clear(&mut self, check_id: CheckId) {
        self.checks.remove(&check_id);
    }
}

/// Thread-safe history handle shared by the tracker and the scheduler
pub type HistoryHandle = Arc<RwLock<HistoryBook>>;

pub fn new_history_handle() -> HistoryHandle {
    Arc::new(RwLock::new(HistoryBook::new()))
}

/// Drains change events into a [`HistoryHandle`]
pub struct HistoryTracker {
    rx: mpsc::Receiver<ChangeEvent>,
    history: HistoryHandle,
}

impl HistoryTracker {
    pub fn new(rx: mpsc::Receiver<ChangeEvent>, history: HistoryHandle) -> Self {
        Self { rx, history }
    }

    /// Apply events until every publisher has been dropped
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            let now = Utc::now();
            tracing::debug!(
                "Recording notification for serviceID {}, notificationID {}",
                event.service_id,
                event.notification_id
            );
            self.history.write().await.record(event, now);
        }
        tracing::debug!("Change channel closed, history tracker stopped");
    }
}
