use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bazaar_domain::models::CartLineItem;
use bazaar_domain::repository::CatalogLookup;
use futures_util::future::join_all;
use tracing::warn;

/// Outcome of one product's vendor lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Vendor(String),
    Unresolved(String),
}

/// Maps product ids to vendor ids through the catalog. Stateless and
/// cache-free; every call hits the catalog.
pub struct VendorResolver {
    catalog: Arc<dyn CatalogLookup>,
    lookup_timeout: Duration,
}

impl VendorResolver {
    pub fn new(catalog: Arc<dyn CatalogLookup>, lookup_timeout: Duration) -> Self {
        Self {
            catalog,
            lookup_timeout,
        }
    }

    /// Resolve every distinct product id in the cart, one concurrent
    /// lookup each, then map results back per product. A lookup error or
    /// timeout marks that product unresolved; it never aborts the
    /// checkout.
    pub async fn resolve_all(&self, items: &[CartLineItem]) -> HashMap<String, Resolution> {
        let mut distinct: Vec<&str> = Vec::new();
        for item in items {
            if !distinct.contains(&item.product_id.as_str()) {
                distinct.push(&item.product_id);
            }
        }

        let lookups = distinct.into_iter().map(|product_id| async move {
            let outcome = tokio::time::timeout(
                self.lookup_timeout,
                self.catalog.resolve_vendor(product_id),
            )
            .await;

            let resolution = match outcome {
                Ok(Ok(Some(vendor_id))) => Resolution::Vendor(vendor_id),
                Ok(Ok(None)) => {
                    warn!("Product {} has no vendor association", product_id);
                    Resolution::Unresolved("no vendor association".to_string())
                }
                Ok(Err(e)) => {
                    warn!("Vendor lookup failed for {}: {}", product_id, e);
                    Resolution::Unresolved(format!("vendor lookup failed: {}", e))
                }
                Err(_) => {
                    warn!("Vendor lookup timed out for {}", product_id);
                    Resolution::Unresolved("vendor lookup timed out".to_string())
                }
            };

            (product_id.to_string(), resolution)
        });

        join_all(lookups).await.into_iter().collect()
    }
}
