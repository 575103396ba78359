//! Dispatcher - per-check notification dispatch service
//!
//! Decides which contacts of a failing check must be notified now, routes the
//! message to the email, SMS or phone sender, and records every decision
//! through change events consumed by the history tracker.

pub mod channel;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod interval;
pub mod publisher;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod target;
pub mod template;
pub mod tracker;

pub use config::{load_config, Config};
pub use error::{DispatchError, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::channel::{Channel, LogSender, SenderTable};
use crate::config::SenderConfig;
use crate::publisher::ChangePublisher;
use crate::scheduler::{Dispatcher, Scheduler};
use crate::store::{JsonFileStore, NotificationStore};
use crate::tracker::{new_history_handle, HistoryTracker};

/// Build the sender table from configuration
pub fn build_senders(configs: &[SenderConfig]) -> SenderTable {
    let mut senders = SenderTable::new();
    for sender_config in configs {
        tracing::debug!(
            "Registering {} sender for {}",
            sender_config.type_name(),
            sender_config.channel()
        );
        match sender_config {
            SenderConfig::Log { channel } => {
                senders.insert(*channel, Arc::new(LogSender::new(*channel)));
            }
        }
    }
    senders
}

/// Channels without a registered sender
pub fn unserved_channels(senders: &SenderTable) -> Vec<Channel> {
    Channel::ALL
        .into_iter()
        .filter(|channel| senders.get(*channel).is_none())
        .collect()
}

/// Run the dispatcher service with the given configuration
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let json_store = JsonFileStore::new(config.store_path.clone());
    tracing::info!("Using notification store {:?}", json_store.path());
    let store: Arc<dyn NotificationStore> = Arc::new(json_store);

    let senders = Arc::new(build_senders(&config.senders));
    if senders.is_empty() {
        tracing::warn!("No senders configured, notifications will only be recorded");
    } else {
        for channel in unserved_channels(&senders) {
            tracing::warn!(
                "No {} sender configured, {} notifications will only be recorded",
                channel,
                channel
            );
        }
    }

    let cancel = CancellationToken::new();
    let history = new_history_handle();
    let (publisher, change_rx) = ChangePublisher::channel(config.change_channel_capacity);
    let tracker = tokio::spawn(HistoryTracker::new(change_rx, Arc::clone(&history)).run());

    let dispatcher = Dispatcher::new(store, senders, publisher, history);
    let scheduler = Scheduler::new(dispatcher, config.checks.clone(), cancel.clone());

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel_for_signal.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });

    tracing::info!("Dispatcher started for {} checks", config.checks.len());

    scheduler.run().await;

    // Dropping the scheduler drops the last publisher, which lets the tracker finish
    drop(scheduler);
    let _ = tracker.await;
    tracing::info!("Dispatcher stopped");

    Ok(())
}
