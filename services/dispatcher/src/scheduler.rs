//! Periodic dispatch: one polling task per configured check

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::channel::SenderTable;
use crate::config::CheckConfig;
use crate::publisher::ChangePublisher;
use crate::service::NotificationService;
use crate::store::NotificationStore;
use crate::target::{CheckId, SentHistory};
use crate::tracker::HistoryHandle;

/// Everything needed to build and run a dispatch pass for any check
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn NotificationStore>,
    senders: Arc<SenderTable>,
    publisher: ChangePublisher,
    history: HistoryHandle,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        senders: Arc<SenderTable>,
        publisher: ChangePublisher,
        history: HistoryHandle,
    ) -> Self {
        Self {
            store,
            senders,
            publisher,
            history,
        }
    }

    /// Evaluate one check once and return its current failure state.
    ///
    /// - failing after being healthy: history is reset, every contact gets a first notification
    /// - still failing: normal resend rules against the tracked history
    /// - recovered: every contact gets one recovery message
    /// - still healthy: nothing
    ///
    /// If the status cannot be read the tick is skipped and `previously_failed` is kept.
    pub async fn tick(&self, check_id: CheckId, previously_failed: bool) -> bool {
        let failed = match self.store.check_failed(check_id).await {
            Ok(failed) => failed,
            Err(e) => {
                tracing::error!("Failed to fetch status of check id {}: {}", check_id, e);
                return previously_failed;
            }
        };

        match (previously_failed, failed) {
            (false, true) => {
                tracing::info!("Check id {} started failing", check_id);
                self.history.write().await.clear(check_id);
                self.dispatch(check_id, true, SentHistory::new()).await;
            }
            (true, true) => {
                let history = self.history.read().await.snapshot(check_id);
                self.dispatch(check_id, true, history).await;
            }
            (true, false) => {
                tracing::info!("Check id {} recovered", check_id);
                self.dispatch(check_id, false, SentHistory::new()).await;
            }
            (false, false) => {}
        }

        failed
    }

    async fn dispatch(&self, check_id: CheckId, failed: bool, history: SentHistory) {
        let service = NotificationService::builder(check_id)
            .failed(failed)
            .history(history)
            .publisher(self.publisher.clone())
            .store(Arc::clone(&self.store))
            .senders(Arc::clone(&self.senders))
            .build();

        match service {
            Ok(service) => service.run().await,
            Err(e) => tracing::error!("Cannot dispatch for check id {}: {}", check_id, e),
        }
    }
}

/// Runs [`Dispatcher::tick`] for every check at its own interval
pub struct Scheduler {
    dispatcher: Dispatcher,
    checks: Vec<CheckConfig>,
    cancel: CancellationToken,
}

impl Scheduler {
    pub fn new(
        dispatcher: Dispatcher,
        checks: Vec<CheckConfig>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            dispatcher,
            checks,
            cancel,
        }
    }

    /// Start polling all checks. Returns when the cancellation token is triggered.
    pub async fn run(&self) {
        let mut handles = Vec::new();

        for check in &self.checks {
            let dispatcher = self.dispatcher.clone();
            let check = check.clone();
            let cancel = self.cancel.clone();
            handles.push(tokio::spawn(async move {
                check_loop(dispatcher, check, cancel).await;
            }));
        }

        self.cancel.cancelled().await;

        for handle in handles {
            let _ = handle.await;
        }
    }
}

async fn check_loop(dispatcher: Dispatcher, check: CheckConfig, cancel: CancellationToken) {
    tracing::debug!("Polling check id {} every {:?}", check.id, check.interval);
    let mut failed = false;

    loop {
        failed = dispatcher.tick(check.id, failed).await;

        tokio::select! {
            _ = tokio::time::sleep(check.interval) => {}
            _ = cancel.cancelled() => {
                tracing::debug!("Polling loop for check id {} cancelled", check.id);
                break;
            }
        }
    }
}
