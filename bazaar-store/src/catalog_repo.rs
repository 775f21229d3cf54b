use std::error::Error;

use async_trait::async_trait;
use bazaar_domain::repository::CatalogLookup;
use sqlx::{PgPool, Row};

/// Postgres-backed product → vendor lookup. No caching; every call hits
/// the catalog table.
pub struct PgCatalogLookup {
    pool: PgPool,
}

impl PgCatalogLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogLookup for PgCatalogLookup {
    async fn resolve_vendor(
        &self,
        product_id: &str,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT vendor_id FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        // A product row with a NULL vendor_id is as unresolved as a
        // missing product.
        match row {
            Some(r) => Ok(r.try_get::<Option<String>, _>("vendor_id")?),
            None => Ok(None),
        }
    }
}
