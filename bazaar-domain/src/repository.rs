use async_trait::async_trait;
use std::error::Error;
use uuid::Uuid;

use crate::events::VendorOrderNotification;
use crate::models::{OrderStatus, SubOrder};

/// Product catalog access, used to map a product to its owning vendor.
/// Deliberately cache-free: every lookup hits the catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Returns the owning vendor for a product, or `Ok(None)` when the
    /// product exists without a vendor association (or not at all).
    async fn resolve_vendor(
        &self,
        product_id: &str,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>>;
}

/// Durable store for sub-orders. Each insert is independent; there is no
/// cross-call transaction.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist one sub-order and return its generated id.
    ///
    /// `idempotency_key` identifies the (user, submission, vendor) triple:
    /// inserting the same key again must return the already-stored id
    /// instead of creating a duplicate.
    async fn insert(
        &self,
        sub_order: &SubOrder,
        idempotency_key: &str,
    ) -> Result<Uuid, Box<dyn Error + Send + Sync>>;

    async fn get(&self, id: Uuid) -> Result<Option<SubOrder>, Box<dyn Error + Send + Sync>>;

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<SubOrder>, Box<dyn Error + Send + Sync>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Best-effort out-of-band delivery to the vendor (push/SMS/webhook).
/// May fail independently of persistence; callers log and move on.
#[async_trait]
pub trait VendorNotifier: Send + Sync {
    async fn notify(
        &self,
        notification: &VendorOrderNotification,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
