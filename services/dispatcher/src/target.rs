//! Notification targets and the data a dispatch pass works on

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::channel::Channel;

/// Identifier of a monitored check
pub type CheckId = i64;

/// Identifier of a registered notification target
pub type TargetId = i64;

/// When each target of a check was last notified.
///
/// Owned by the history tracker; a dispatch pass only ever sees a snapshot.
pub type SentHistory = HashMap<TargetId, DateTime<Utc>>;

/// One registered contact for a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTarget {
    pub id: TargetId,
    /// Raw channel tag as stored, e.g. "email". Unrecognized tags are kept
    /// so that the dispatch pass can skip them.
    #[serde(rename = "type")]
    pub contact_type: String,
    pub address: String,
    #[serde(default)]
    pub resend_class: i32,
}

impl NotificationTarget {
    pub fn new(
        id: TargetId,
        contact_type: impl Into<String>,
        address: impl Into<String>,
        resend_class: i32,
    ) -> Self {
        Self {
            id,
            contact_type: contact_type.into(),
            address: address.into(),
            resend_class,
        }
    }

    /// Resolve the contact type tag into a known channel
    pub fn channel(&self) -> Option<Channel> {
        Channel::from_tag(&self.contact_type)
    }
}

/// Descriptive details about a monitored check, used only for message text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub kind: String,
}
