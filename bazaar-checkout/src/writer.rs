use std::sync::Arc;
use std::time::Duration;

use bazaar_domain::models::{Cart, SubOrder};
use bazaar_domain::repository::OrderStore;
use futures_util::stream::{self, StreamExt};
use tracing::error;
use uuid::Uuid;

/// Per-group outcome of the fan-out write, reported in input order
#[derive(Debug)]
pub struct WriteOutcome {
    pub index: usize,
    pub vendor_id: String,
    pub result: Result<Uuid, String>,
}

/// Key for one vendor group of one checkout submission. A caller retry
/// with the same submission id maps to the same key, so already-written
/// groups are returned, not duplicated.
pub fn idempotency_key(user_id: &str, submission_id: Uuid, vendor_id: &str) -> String {
    format!("{}:{}:{}", user_id, submission_id, vendor_id)
}

/// Persists sub-orders through the durable store, one independent write
/// per vendor group. The store offers no cross-call transaction, so the
/// writer never pretends to have one: each group succeeds or fails on its
/// own.
pub struct FulfillmentWriter {
    store: Arc<dyn OrderStore>,
    concurrency: usize,
    write_timeout: Duration,
}

impl FulfillmentWriter {
    pub fn new(store: Arc<dyn OrderStore>, concurrency: usize, write_timeout: Duration) -> Self {
        Self {
            store,
            concurrency,
            write_timeout,
        }
    }

    /// Attempt every write regardless of earlier failures (no fail-fast).
    /// Writes run concurrently up to the configured bound; outcomes are
    /// re-ordered back to input order before returning. A write that
    /// exceeds the deadline fails that group only.
    pub async fn write_all(&self, cart: &Cart, sub_orders: &[SubOrder]) -> Vec<WriteOutcome> {
        let write_timeout = self.write_timeout;

        // Futures are built up front so the stream carries concrete values
        // rather than a closure over borrowed sub-orders.
        let writes: Vec<_> = sub_orders
            .iter()
            .enumerate()
            .map(|(index, sub_order)| {
                let store = Arc::clone(&self.store);
                let key =
                    idempotency_key(&cart.user_id, cart.submission_id, &sub_order.vendor_id);
                async move {
                    let result =
                        match tokio::time::timeout(write_timeout, store.insert(sub_order, &key))
                            .await
                        {
                            Ok(Ok(id)) => Ok(id),
                            Ok(Err(e)) => {
                                error!(
                                    "Sub-order write failed for vendor {}: {}",
                                    sub_order.vendor_id, e
                                );
                                Err(e.to_string())
                            }
                            Err(_) => {
                                error!(
                                    "Sub-order write timed out for vendor {}",
                                    sub_order.vendor_id
                                );
                                Err("write deadline exceeded".to_string())
                            }
                        };

                    WriteOutcome {
                        index,
                        vendor_id: sub_order.vendor_id.clone(),
                        result,
                    }
                }
            })
            .collect();

        let mut outcomes: Vec<WriteOutcome> = stream::iter(writes)
            .buffer_unordered(self.concurrency.max(1))
            .collect()
            .await;

        outcomes.sort_by_key(|o| o.index);
        outcomes
    }
}
