use std::sync::Arc;
use std::time::Duration;

use bazaar_domain::events::VendorOrderNotification;
use bazaar_domain::repository::VendorNotifier;
use futures_util::future::join_all;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Bounded retry for vendor notifications
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(200),
        }
    }
}

/// Short human-readable reference shown to the vendor.
/// Format: BZR-{first 8 hex of the order id}
pub fn order_number(order_id: Uuid) -> String {
    format!(
        "BZR-{}",
        order_id.simple().to_string()[..8].to_uppercase()
    )
}

/// Best-effort delivery of "new order" notifications to vendors.
///
/// Runs only from the trusted server side and always off the checkout
/// response path: an order is created the moment its write is confirmed,
/// whatever happens here. Failures are logged, never surfaced.
pub struct NotificationDispatcher {
    notifier: Arc<dyn VendorNotifier>,
    policy: RetryPolicy,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn VendorNotifier>, policy: RetryPolicy) -> Self {
        Self { notifier, policy }
    }

    /// Deliver one notification, retrying with linear backoff. After the
    /// last attempt the error is logged and dropped.
    pub async fn dispatch(&self, notification: &VendorOrderNotification) {
        let attempts = self.policy.max_attempts.max(1);
        for attempt in 1..=attempts {
            match self.notifier.notify(notification).await {
                Ok(()) => {
                    info!(
                        "Notified vendor {} about order {}",
                        notification.vendor_id, notification.order_number
                    );
                    return;
                }
                Err(e) if attempt < attempts => {
                    warn!(
                        "Vendor notification attempt {}/{} failed for {}: {}",
                        attempt, attempts, notification.vendor_id, e
                    );
                    tokio::time::sleep(self.policy.backoff * attempt).await;
                }
                Err(e) => {
                    error!(
                        "Giving up on vendor notification for {} after {} attempts: {}",
                        notification.vendor_id, attempts, e
                    );
                }
            }
        }
    }

    /// Deliver a batch concurrently, one dispatch per written sub-order.
    /// Callers spawn this; it is never awaited on the caller's critical
    /// return.
    pub async fn dispatch_all(&self, notifications: Vec<VendorOrderNotification>) {
        join_all(notifications.iter().map(|n| self.dispatch(n))).await;
    }
}
