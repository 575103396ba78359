//! BDD test world for the dispatcher service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use cucumber::World;
use dispatcher::channel::{Channel, Sender, SenderTable};
use dispatcher::publisher::ChangeEvent;
use dispatcher::store::NotificationStore;
use dispatcher::target::{CheckId, NotificationTarget, SentHistory, ServiceInfo};
use dispatcher::DispatchError;

/// A sender that records every delivery and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Sender for RecordingSender {
    async fn send(&self, address: &str, message: &str) -> dispatcher::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((address.to_string(), message.to_string()));
        if self.fail {
            Err(DispatchError::Delivery("gateway unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

/// In-memory store driven by the scenario
#[derive(Debug, Default)]
pub struct ScriptedStore {
    pub failed: bool,
    pub targets: Vec<NotificationTarget>,
    pub settings_fail: bool,
    pub info_fail: bool,
    pub info_fetches: AtomicUsize,
}

#[async_trait::async_trait]
impl NotificationStore for ScriptedStore {
    async fn notification_targets(
        &self,
        _check_id: CheckId,
    ) -> dispatcher::Result<Vec<NotificationTarget>> {
        if self.settings_fail {
            return Err(DispatchError::Store("settings database unavailable".to_string()));
        }
        Ok(self.targets.clone())
    }

    async fn service_info(&self, _check_id: CheckId) -> dispatcher::Result<ServiceInfo> {
        self.info_fetches.fetch_add(1, Ordering::SeqCst);
        if self.info_fail {
            return Err(DispatchError::Store("service database unavailable".to_string()));
        }
        Ok(ServiceInfo {
            name: "checkout".to_string(),
            host: "shop.example.com".to_string(),
            kind: "http".to_string(),
        })
    }

    async fn check_failed(&self, _check_id: CheckId) -> dispatcher::Result<bool> {
        Ok(self.failed)
    }
}

#[derive(Debug, World)]
pub struct DispatcherWorld {
    pub check_id: CheckId,
    pub store: ScriptedStore,
    pub history: SentHistory,
    pub now: Option<DateTime<Utc>>,

    pub email: Arc<RecordingSender>,
    pub sms: Arc<RecordingSender>,
    pub phone: Arc<RecordingSender>,

    pub events: Vec<ChangeEvent>,
    pub build_error: Option<DispatchError>,
    pub eligible: Option<bool>,
    pub history_after: Option<SentHistory>,
    pub reported_failed: Option<bool>,
}

impl Default for DispatcherWorld {
    fn default() -> Self {
        Self {
            check_id: 42,
            store: ScriptedStore::default(),
            history: SentHistory::new(),
            now: None,
            email: Arc::new(RecordingSender::default()),
            sms: Arc::new(RecordingSender::default()),
            phone: Arc::new(RecordingSender::default()),
            events: Vec::new(),
            build_error: None,
            eligible: None,
            history_after: None,
            reported_failed: None,
        }
    }
}

impl DispatcherWorld {
    /// Reference time for the scenario, fixed on first use
    pub fn now(&mut self) -> DateTime<Utc> {
        *self.now.get_or_insert_with(Utc::now)
    }

    pub fn senders(&self) -> Arc<SenderTable> {
        Arc::new(
            SenderTable::new()
                .with(Channel::Email, Arc::clone(&self.email) as Arc<dyn Sender>)
                .with(Channel::Sms, Arc::clone(&self.sms) as Arc<dyn Sender>)
                .with(Channel::Phone, Arc::clone(&self.phone) as Arc<dyn Sender>),
        )
    }

    pub fn sender(&self, channel: &str) -> &RecordingSender {
        match channel {
            "email" => self.email.as_ref(),
            "sms" => self.sms.as_ref(),
            "phone" => self.phone.as_ref(),
            other => panic!("Unknown channel: {}", other),
        }
    }

    pub fn sender_mut(&mut self, channel: &str) -> &mut Arc<RecordingSender> {
        match channel {
            "email" => &mut self.email,
            "sms" => &mut self.sms,
            "phone" => &mut self.phone,
            other => panic!("Unknown channel: {}", other),
        }
    }

    pub fn total_sends(&self) -> usize {
        self.email.sent().len() + self.sms.sent().len() + self.phone.sent().len()
    }
}
