//! Decides whether a target should be notified now

use chrono::{DateTime, Utc};

use crate::interval::{self, NEVER_RESEND};
use crate::publisher::{ChangeEvent, ChangePublisher};
use crate::target::{CheckId, NotificationTarget, SentHistory};

/// Outcome of evaluating a single target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Never notified before
    FirstSend,
    /// Resend interval has elapsed
    Resend,
    /// Class 1 target that was already notified once
    Suppressed,
    /// Resend interval has not elapsed yet
    TooEarly,
}

impl Decision {
    pub fn fires(self) -> bool {
        matches!(self, Decision::FirstSend | Decision::Resend)
    }
}

/// Pure part of the eligibility check. No events, no logging beyond the
/// interval policy's warning for unknown classes.
pub fn decide(target: &NotificationTarget, history: &SentHistory, now: DateTime<Utc>) -> Decision {
    let Some(last_sent) = history.get(&target.id) else {
        return Decision::FirstSend;
    };

    if target.resend_class == NEVER_RESEND {
        return Decision::Suppressed;
    }

    let resend_after = interval::resolve(target.resend_class);
    if now >= *last_sent + resend_after {
        Decision::Resend
    } else {
        Decision::TooEarly
    }
}

/// Decide whether `target` should be notified now and, if so, publish a
/// [`ChangeEvent`] so the history tracker records the send.
///
/// The event is published before returning, so it goes out regardless of
/// whether the later delivery succeeds.
pub async fn should_notify(
    check_id: CheckId,
    target: &NotificationTarget,
    history: &SentHistory,
    now: DateTime<Utc>,
    publisher: &ChangePublisher,
) -> bool {
    let decision = decide(target, history, now);

    match decision {
        Decision::FirstSend => {
            tracing::debug!(
                "Sending first notification for serviceID {}, notificationID {}",
                check_id,
                target.id
            );
        }
        Decision::Resend => {
            tracing::debug!(
                "Resending notification for serviceID {}, notificationID {} (class {})",
                check_id,
                target.id,
                target.resend_class
            );
        }
        Decision::Suppressed | Decision::TooEarly => return false,
    }

    publisher
        .publish(ChangeEvent {
            service_id: check_id,
            notification_id: target.id,
        })
        .await;
    true
}
