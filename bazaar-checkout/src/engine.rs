use std::sync::Arc;
use std::time::Duration;

use bazaar_domain::events::VendorOrderNotification;
use bazaar_domain::models::{Cart, FulfillmentResult};
use bazaar_domain::repository::{CatalogLookup, OrderStore, VendorNotifier};
use tracing::info;

use crate::aggregate;
use crate::builder::build_sub_order;
use crate::error::CheckoutError;
use crate::fees;
use crate::notify::{order_number, NotificationDispatcher, RetryPolicy};
use crate::partition::partition;
use crate::resolver::VendorResolver;
use crate::writer::FulfillmentWriter;

/// Deadlines and fan-out bounds for one checkout invocation
#[derive(Debug, Clone, Copy)]
pub struct CheckoutPolicy {
    /// Per-lookup deadline for catalog resolution
    pub lookup_timeout: Duration,
    /// Per-group deadline for sub-order writes
    pub write_timeout: Duration,
    /// Concurrent write bound for the fulfillment fan-out
    pub writer_concurrency: usize,
    pub notify_retry: RetryPolicy,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(3),
            write_timeout: Duration::from_secs(5),
            writer_concurrency: 4,
            notify_retry: RetryPolicy::default(),
        }
    }
}

/// The checkout-to-fulfillment partitioning engine.
///
/// One invocation is one independent unit of work: the engine holds no
/// mutable state, so concurrent checkouts need no coordination beyond the
/// store's own id generation.
pub struct CheckoutEngine {
    resolver: VendorResolver,
    writer: FulfillmentWriter,
    dispatcher: Arc<NotificationDispatcher>,
}

/// Reject carts that break the money/quantity invariants before any
/// catalog or store call. Amounts arrive from the HTTP surface as plain
/// integers, so negatives must be caught here, not assumed away: a
/// negative fee would make the fee split lose paise silently.
fn validate_cart(cart: &Cart) -> Result<(), CheckoutError> {
    if cart.items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if cart.delivery_fee < 0 {
        return Err(CheckoutError::InvalidCart(format!(
            "delivery fee cannot be negative (got {})",
            cart.delivery_fee
        )));
    }
    for item in &cart.items {
        if item.unit_price < 0 {
            return Err(CheckoutError::InvalidCart(format!(
                "negative unit price for product {}",
                item.product_id
            )));
        }
        if item.quantity == 0 {
            return Err(CheckoutError::InvalidCart(format!(
                "zero quantity for product {}",
                item.product_id
            )));
        }
    }
    Ok(())
}

impl CheckoutEngine {
    pub fn new(
        catalog: Arc<dyn CatalogLookup>,
        store: Arc<dyn OrderStore>,
        notifier: Arc<dyn VendorNotifier>,
        policy: CheckoutPolicy,
    ) -> Self {
        Self {
            resolver: VendorResolver::new(catalog, policy.lookup_timeout),
            writer: FulfillmentWriter::new(store, policy.writer_concurrency, policy.write_timeout),
            dispatcher: Arc::new(NotificationDispatcher::new(notifier, policy.notify_retry)),
        }
    }

    /// Turn one cart into one durable sub-order per vendor, each priced
    /// with its subtotal plus an even share of the delivery fee, then
    /// notify each owning vendor best-effort.
    ///
    /// Partial failure is the expected case, not corruption: a group that
    /// fails to write is reported in `partition_errors` while its siblings
    /// stand, and notification outcomes never affect the returned result.
    pub async fn create_order(&self, cart: &Cart) -> Result<FulfillmentResult, CheckoutError> {
        validate_cart(cart)?;

        let resolutions = self.resolver.resolve_all(&cart.items).await;
        let partitioned = partition(cart, &resolutions)?;

        let shares = fees::allocate(cart.delivery_fee, &partitioned.groups);
        let sub_orders: Vec<_> = partitioned
            .groups
            .iter()
            .zip(shares.iter())
            .map(|(group, share)| build_sub_order(cart, group, *share))
            .collect();

        let write_outcomes = self.writer.write_all(cart, &sub_orders).await;

        let notifications: Vec<VendorOrderNotification> = write_outcomes
            .iter()
            .filter_map(|outcome| {
                outcome.result.as_ref().ok().map(|id| {
                    let sub_order = &sub_orders[outcome.index];
                    VendorOrderNotification {
                        vendor_id: sub_order.vendor_id.clone(),
                        order_id: *id,
                        order_number: order_number(*id),
                        customer_name: cart.address.name.clone(),
                        total_amount: sub_order.total_amount,
                    }
                })
            })
            .collect();

        let result = aggregate::aggregate(&write_outcomes, partitioned.unresolved)?;

        // Orders are final at this point; vendor delivery happens off the
        // response path and its failures are logged, not returned.
        let dispatcher = Arc::clone(&self.dispatcher);
        tokio::spawn(async move {
            dispatcher.dispatch_all(notifications).await;
        });

        info!(
            "Checkout {} for user {}: {} of {} groups written",
            cart.submission_id,
            cart.user_id,
            result.order_count,
            sub_orders.len()
        );

        Ok(result)
    }
}
