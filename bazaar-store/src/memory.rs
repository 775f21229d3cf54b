//! In-memory collaborator implementations, used in tests and for local
//! development without Postgres.

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bazaar_domain::events::VendorOrderNotification;
use bazaar_domain::models::{OrderStatus, SubOrder};
use bazaar_domain::repository::{CatalogLookup, OrderStore, VendorNotifier};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

#[derive(Default)]
struct OrderStoreInner {
    orders: HashMap<Uuid, SubOrder>,
    by_idempotency_key: HashMap<String, Uuid>,
    insertion_order: Vec<Uuid>,
    failing_vendors: HashSet<String>,
}

/// HashMap-backed order store with per-vendor failure injection
#[derive(Default)]
pub struct MemoryOrderStore {
    inner: Mutex<OrderStoreInner>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert for this vendor fail, to exercise partial-failure
    /// paths.
    pub fn fail_vendor(&self, vendor_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .failing_vendors
            .insert(vendor_id.to_string());
    }

    /// Undo [`fail_vendor`](Self::fail_vendor), simulating a transient
    /// outage that has passed.
    pub fn heal_vendor(&self, vendor_id: &str) {
        self.inner.lock().unwrap().failing_vendors.remove(vendor_id);
    }

    pub fn order_count(&self) -> usize {
        self.inner.lock().unwrap().orders.len()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(
        &self,
        sub_order: &SubOrder,
        idempotency_key: &str,
    ) -> Result<Uuid, Box<dyn Error + Send + Sync>> {
        let mut inner = self.inner.lock().unwrap();

        if inner.failing_vendors.contains(&sub_order.vendor_id) {
            return Err(format!("injected store failure for {}", sub_order.vendor_id).into());
        }

        if let Some(existing) = inner.by_idempotency_key.get(idempotency_key) {
            return Ok(*existing);
        }

        let id = Uuid::new_v4();
        let mut stored = sub_order.clone();
        stored.id = Some(id);

        inner.orders.insert(id, stored);
        inner
            .by_idempotency_key
            .insert(idempotency_key.to_string(), id);
        inner.insertion_order.push(id);
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<SubOrder>, Box<dyn Error + Send + Sync>> {
        Ok(self.inner.lock().unwrap().orders.get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<SubOrder>, Box<dyn Error + Send + Sync>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .insertion_order
            .iter()
            .filter_map(|id| inner.orders.get(id))
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut inner = self.inner.lock().unwrap();
        let order = inner
            .orders
            .get_mut(&id)
            .ok_or_else(|| format!("order not found: {}", id))?;
        order.order_status = status;
        order.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Default)]
struct CatalogInner {
    vendors_by_product: HashMap<String, String>,
    failing_products: HashSet<String>,
}

/// HashMap-backed product → vendor catalog with lookup-failure injection
#[derive(Default)]
pub struct MemoryCatalog {
    inner: Mutex<CatalogInner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&self, product_id: &str, vendor_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .vendors_by_product
            .insert(product_id.to_string(), vendor_id.to_string());
    }

    /// Make lookups for this product error, simulating a catalog outage.
    pub fn fail_product(&self, product_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .failing_products
            .insert(product_id.to_string());
    }
}

#[async_trait]
impl CatalogLookup for MemoryCatalog {
    async fn resolve_vendor(
        &self,
        product_id: &str,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let inner = self.inner.lock().unwrap();
        if inner.failing_products.contains(product_id) {
            return Err(format!("catalog unavailable for {}", product_id).into());
        }
        Ok(inner.vendors_by_product.get(product_id).cloned())
    }
}

/// Notifier that records deliveries and can fail the next N attempts
#[derive(Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<VendorOrderNotification>>,
    attempts: AtomicU32,
    failures_remaining: AtomicU32,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, n: u32) {
        self.failures_remaining.store(n, Ordering::SeqCst);
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn delivered(&self) -> Vec<VendorOrderNotification> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl VendorNotifier for RecordingNotifier {
    async fn notify(
        &self,
        notification: &VendorOrderNotification,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err("injected notify failure".into());
        }

        self.delivered.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Delivery adapter that only logs. Deployments plug a real push/SMS
/// gateway behind `VendorNotifier`; this keeps local runs dependency-free.
pub struct LogNotifier;

#[async_trait]
impl VendorNotifier for LogNotifier {
    async fn notify(
        &self,
        notification: &VendorOrderNotification,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        info!(
            "Vendor {} notified: order {} ({}) for {} paise",
            notification.vendor_id,
            notification.order_number,
            notification.order_id,
            notification.total_amount
        );
        Ok(())
    }
}
