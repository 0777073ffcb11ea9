//! Delivery of notifications to the user.

use crate::models::{Notification, Severity};

use async_trait::async_trait;

/// Presents notifications.
///
/// `notify` resolves once the notification no longer blocks the caller: right
/// away for toasts, after the user dismisses it for modals.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Present a notification.
    async fn notify(&self, notification: Notification);
}

/// Notifier that only writes notifications to the log.
///
/// Used when no front end is attached; modals never block.
#[derive(Debug, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::warn!(
                title = %notification.title,
                blocking = notification.is_blocking(),
                "{}",
                notification.message
            ),
            Severity::Info | Severity::Success => tracing::info!(
                title = %notification.title,
                "{}",
                notification.message
            ),
        }
    }
}
