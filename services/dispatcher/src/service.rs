//! Per-check notification service: one dispatch pass over all targets

use std::sync::Arc;

use chrono::Utc;

use crate::channel::{Channel, SenderTable};
use crate::eligibility::should_notify;
use crate::publisher::ChangePublisher;
use crate::store::NotificationStore;
use crate::target::{CheckId, NotificationTarget, SentHistory, ServiceInfo};
use crate::template;
use crate::DispatchError;

/// Dispatches notifications for a single check.
///
/// Built once per pass with the check's current health and a snapshot of its
/// sent history. [`NotificationService::run`] never fails; every problem is
/// logged and only affects the target it happened on.
pub struct NotificationService {
    check_id: CheckId,
    failed: bool,
    history: SentHistory,
    publisher: ChangePublisher,
    store: Arc<dyn NotificationStore>,
    senders: Arc<SenderTable>,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("check_id", &self.check_id)
            .field("failed", &self.failed)
            .field("history", &self.history.len())
            .field("senders", &self.senders)
            .finish()
    }
}

impl NotificationService {
    pub fn builder(check_id: CheckId) -> NotificationServiceBuilder {
        NotificationServiceBuilder::new(check_id)
    }

    /// Run one dispatch pass
    pub async fn run(&self) {
        let targets = match self.store.notification_targets(self.check_id).await {
            Ok(targets) => targets,
            Err(e) => {
                tracing::error!(
                    "Failed to fetch notification settings for check id {}: {}",
                    self.check_id,
                    e
                );
                Vec::new()
            }
        };

        let info = match self.store.service_info(self.check_id).await {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::error!(
                    "Failed to fetch service info for check id {}: {}",
                    self.check_id,
                    e
                );
                None
            }
        };

        tracing::debug!(
            "Dispatch pass for check id {}: {} targets, failed={}",
            self.check_id,
            targets.len(),
            self.failed
        );

        for target in &targets {
            let now = Utc::now();
            if !should_notify(self.check_id, target, &self.history, now, &self.publisher).await {
                continue;
            }

            // Unrecognized contact types are skipped without logging
            let Some(channel) = target.channel() else {
                continue;
            };

            self.deliver(channel, target, info.as_ref()).await;
        }
    }

    async fn deliver(
        &self,
        channel: Channel,
        target: &NotificationTarget,
        info: Option<&ServiceInfo>,
    ) {
        let Some(sender) = self.senders.get(channel) else {
            tracing::warn!(
                "No {} sender configured, skipping notificationID {} for check id {}",
                channel,
                target.id,
                self.check_id
            );
            return;
        };

        let message = template::render(channel, self.failed, info);
        if let Err(e) = sender.send(&target.address, &message).await {
            tracing::error!(
                "Failed to send {} to {} (notificationID {}) for check id {}: {}",
                channel,
                target.address,
                target.id,
                self.check_id,
                e
            );
        }
    }
}

/// Builder for [`NotificationService`]
#[derive(Default)]
pub struct NotificationServiceBuilder {
    check_id: CheckId,
    failed: bool,
    history: SentHistory,
    publisher: Option<ChangePublisher>,
    store: Option<Arc<dyn NotificationStore>>,
    senders: Option<Arc<SenderTable>>,
}

impl NotificationServiceBuilder {
    pub fn new(check_id: CheckId) -> Self {
        Self {
            check_id,
            ..Default::default()
        }
    }

    pub fn failed(mut self, failed: bool) -> Self {
        self.failed = failed;
        self
    }

    pub fn history(mut self, history: SentHistory) -> Self {
        self.history = history;
        self
    }

    pub fn publisher(mut self, publisher: ChangePublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn store(mut self, store: Arc<dyn NotificationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn senders(mut self, senders: Arc<SenderTable>) -> Self {
        self.senders = Some(senders);
        self
    }

    pub fn build(self) -> crate::Result<NotificationService> {
        if self.check_id <= 0 {
            return Err(DispatchError::Config(format!(
                "check id must be a positive number, got {}",
                self.check_id
            )));
        }
        let store = self
            .store
            .ok_or_else(|| DispatchError::Config("store must be set".to_string()))?;
        let senders = self
            .senders
            .ok_or_else(|| DispatchError::Config("senders must be set".to_string()))?;
        let publisher = self
            .publisher
            .ok_or_else(|| DispatchError::Config("change publisher must be set".to_string()))?;

        Ok(NotificationService {
            check_id: self.check_id,
            failed: self.failed,
            history: self.history,
            publisher,
            store,
            senders,
        })
    }
}
