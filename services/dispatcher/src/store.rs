//! Notification settings store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::target::{CheckId, NotificationTarget, ServiceInfo};
use crate::DispatchError;

/// Source of notification settings and service details for checks
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait NotificationStore: Send + Sync {
    /// All registered notification targets of a check, in stored order
    async fn notification_targets(
        &self,
        check_id: CheckId,
    ) -> crate::Result<Vec<NotificationTarget>>;

    /// Descriptive details of a check
    async fn service_info(&self, check_id: CheckId) -> crate::Result<ServiceInfo>;

    /// Whether the check is currently failing
    async fn check_failed(&self, check_id: CheckId) -> crate::Result<bool>;
}

/// On-disk layout of the JSON store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(default)]
    pub checks: Vec<StoredCheck>,
}

/// A check entry in the JSON store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCheck {
    pub id: CheckId,
    #[serde(default)]
    pub failed: bool,
    #[serde(default)]
    pub info: ServiceInfo,
    #[serde(default)]
    pub targets: Vec<NotificationTarget>,
}

/// Store backed by a JSON file, re-read on every call so that an external
/// process can update it while the dispatcher runs
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> crate::Result<StoreFile> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DispatchError::Store(format!("Failed to read store file {:?}: {}", self.path, e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            DispatchError::Store(format!("Failed to parse store file {:?}: {}", self.path, e))
        })
    }

    async fn find(&self, check_id: CheckId) -> crate::Result<StoredCheck> {
        self.load()
            .await?
            .checks
            .into_iter()
            .find(|c| c.id == check_id)
            .ok_or_else(|| DispatchError::Store(format!("Unknown check id {}", check_id)))
    }
}

#[async_trait]
impl NotificationStore for JsonFileStore {
    async fn notification_targets(
        &self,
        check_id: CheckId,
    ) -> crate::Result<Vec<NotificationTarget>> {
        Ok(self.find(check_id).await?.targets)
    }

    async fn service_info(&self, check_id: CheckId) -> crate::Result<ServiceInfo> {
        Ok(self.find(check_id).await?.info)
    }

    async fn check_failed(&self, check_id: CheckId) -> crate::Result<bool> {
        Ok(self.find(check_id).await?.failed)
    }
}
