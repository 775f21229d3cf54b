use std::error::Error;

use async_trait::async_trait;
use bazaar_domain::models::{
    Address, CartLineItem, OrderStatus, PaymentMethod, PaymentStatus, SubOrder,
};
use bazaar_domain::repository::OrderStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Postgres-backed order store.
///
/// Each insert is a single independent statement; the idempotency key
/// carries a unique index, so re-running a write for the same
/// (user, submission, vendor) returns the already-stored id instead of
/// creating a second row.
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_sub_order(row: &PgRow) -> Result<SubOrder, Box<dyn Error + Send + Sync>> {
    let items: serde_json::Value = row.try_get("items")?;
    let items: Vec<CartLineItem> = serde_json::from_value(items)?;

    let address: serde_json::Value = row.try_get("address")?;
    let address: Address = serde_json::from_value(address)?;

    let payment_method: String = row.try_get("payment_method")?;
    let payment_method = PaymentMethod::parse(&payment_method)
        .ok_or_else(|| format!("unknown payment method: {}", payment_method))?;

    let payment_status: String = row.try_get("payment_status")?;
    let payment_status = PaymentStatus::parse(&payment_status)
        .ok_or_else(|| format!("unknown payment status: {}", payment_status))?;

    let order_status: String = row.try_get("order_status")?;
    let order_status = OrderStatus::parse(&order_status)
        .ok_or_else(|| format!("unknown order status: {}", order_status))?;

    Ok(SubOrder {
        id: Some(row.try_get("id")?),
        user_id: row.try_get("user_id")?,
        vendor_id: row.try_get("vendor_id")?,
        items,
        subtotal: row.try_get("subtotal")?,
        delivery_fee_share: row.try_get("delivery_fee_share")?,
        total_amount: row.try_get("total_amount")?,
        payment_method,
        payment_status,
        order_status,
        address,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const SUB_ORDER_COLUMNS: &str = "id, user_id, vendor_id, items, subtotal, delivery_fee_share, \
     total_amount, payment_method, payment_status, order_status, address, created_at, updated_at";

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(
        &self,
        sub_order: &SubOrder,
        idempotency_key: &str,
    ) -> Result<Uuid, Box<dyn Error + Send + Sync>> {
        let id = Uuid::new_v4();
        let items = serde_json::to_value(&sub_order.items)?;
        let address = serde_json::to_value(&sub_order.address)?;

        // The no-op DO UPDATE makes the conflicting row visible to
        // RETURNING, so a replayed key hands back the original id.
        let row = sqlx::query(
            r#"
            INSERT INTO sub_orders (id, user_id, vendor_id, items, subtotal,
                delivery_fee_share, total_amount, payment_method, payment_status,
                order_status, address, idempotency_key, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (idempotency_key)
                DO UPDATE SET updated_at = sub_orders.updated_at
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&sub_order.user_id)
        .bind(&sub_order.vendor_id)
        .bind(items)
        .bind(sub_order.subtotal)
        .bind(sub_order.delivery_fee_share)
        .bind(sub_order.total_amount)
        .bind(sub_order.payment_method.as_str())
        .bind(sub_order.payment_status.as_str())
        .bind(sub_order.order_status.as_str())
        .bind(address)
        .bind(idempotency_key)
        .bind(sub_order.created_at)
        .bind(sub_order.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get("id")?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<SubOrder>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sub_orders WHERE id = $1",
            SUB_ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_sub_order(&r)).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<SubOrder>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM sub_orders WHERE user_id = $1 ORDER BY created_at ASC",
            SUB_ORDER_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_sub_order).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let result = sqlx::query(
            "UPDATE sub_orders SET order_status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("order not found: {}", id).into());
        }
        Ok(())
    }
}
