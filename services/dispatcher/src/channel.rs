//! Delivery channels and the sender lookup table

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The kind of contact a notification is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Phone,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Email, Channel::Sms, Channel::Phone];

    /// Parse a stored contact type tag. Returns `None` for anything unrecognized.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "email" => Some(Channel::Email),
            "sms" => Some(Channel::Sms),
            "phone" => Some(Channel::Phone),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Sms => write!(f, "sms"),
            Channel::Phone => write!(f, "phone"),
        }
    }
}

/// Trait for delivering a rendered message to a contact address
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Sender: Send + Sync {
    /// Deliver `message` to `address`
    async fn send(&self, address: &str, message: &str) -> crate::Result<()>;
}

/// Senders keyed by the channel they deliver through
#[derive(Clone, Default)]
pub struct SenderTable {
    senders: HashMap<Channel, Arc<dyn Sender>>,
}

impl fmt::Debug for SenderTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut channels: Vec<String> = self.senders.keys().map(|c| c.to_string()).collect();
        channels.sort();
        f.debug_struct("SenderTable")
            .field("channels", &channels)
            .finish()
    }
}

impl SenderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sender` for `channel`, replacing any previous one
    pub fn with(mut self, channel: Channel, sender: Arc<dyn Sender>) -> Self {
        self.insert(channel, sender);
        self
    }

    pub fn insert(&mut self, channel: Channel, sender: Arc<dyn Sender>) {
        self.senders.insert(channel, sender);
    }

    pub fn get(&self, channel: Channel) -> Option<&Arc<dyn Sender>> {
        self.senders.get(&channel)
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

/// Sender that writes every message to the log instead of delivering it
#[derive(Debug, Clone)]
pub struct LogSender {
    channel: Channel,
}

impl LogSender {
    pub fn new(channel: Channel) -> Self {
        tracing::debug!("Created LogSender for channel '{}'", channel);
        Self { channel }
    }
}

#[async_trait]
impl Sender for LogSender {
    async fn send(&self, address: &str, message: &str) -> crate::Result<()> {
        tracing::info!(
            channel = %self.channel,
            address,
            "Notification: {}",
            message
        );
        Ok(())
    }
}
