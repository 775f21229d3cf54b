use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Monetary amount in paise (integer minor units). Keeping money integral
/// makes fee splitting exact: a flat fee always divides into shares that
/// sum back to the original amount.
pub type Paise = i64;

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cod,
    Online,
}

/// Payment state of a sub-order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// Fulfillment state of a sub-order. The checkout engine only ever
/// produces `Pending`; all later transitions come from vendor/admin
/// workflows and are validated by [`crate::lifecycle`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "preparing" => Some(OrderStatus::Preparing),
            "ready" => Some(OrderStatus::Ready),
            "out_for_delivery" => Some(OrderStatus::OutForDelivery),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Online => "online",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cod" => Some(PaymentMethod::Cod),
            "online" => Some(PaymentMethod::Online),
            _ => None,
        }
    }
}

/// Delivery address captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub phone: String,
    pub pincode: String,
    pub city: String,
    pub address_text: String,
}

/// One line of the customer's cart. Immutable once the cart is submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: String,
    pub name: String,
    pub unit_price: Paise,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn line_total(&self) -> Paise {
        self.unit_price * self.quantity as i64
    }
}

/// The customer's submitted cart. Lives only for the duration of one
/// checkout call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: String,
    /// One id per checkout attempt, supplied by the caller. Retrying the
    /// same submission reuses the same id so per-vendor writes stay
    /// idempotent.
    pub submission_id: Uuid,
    pub items: Vec<CartLineItem>,
    /// Flat delivery fee for the whole cart, not yet split across vendors.
    pub delivery_fee: Paise,
    pub payment_method: PaymentMethod,
    pub address: Address,
    /// Pre-known vendor for single-vendor storefronts. Used as the
    /// whole-cart fallback when no item resolves through the catalog.
    #[serde(default)]
    pub vendor_hint: Option<String>,
}

/// The partition of cart items attributable to one vendor. Derived during
/// checkout and discarded.
#[derive(Debug, Clone)]
pub struct VendorGroup {
    pub vendor_id: String,
    pub items: Vec<CartLineItem>,
}

impl VendorGroup {
    pub fn subtotal(&self) -> Paise {
        self.items.iter().map(|i| i.line_total()).sum()
    }
}

/// One persisted fulfillment record, scoped to a single vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubOrder {
    /// Assigned by the order store on insert; `None` while unsaved.
    pub id: Option<Uuid>,
    pub user_id: String,
    pub vendor_id: String,
    pub items: Vec<CartLineItem>,
    pub subtotal: Paise,
    pub delivery_fee_share: Paise,
    pub total_amount: Paise,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A vendor group whose write failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionError {
    pub vendor_id: String,
    pub reason: String,
}

/// A cart item that could not be attributed to any vendor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnresolvedItem {
    pub product_id: String,
    pub reason: String,
}

/// Caller-facing outcome of one checkout call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentResult {
    /// Id of the first successfully written group, in original group order
    pub primary_order_id: Uuid,
    pub order_count: usize,
    pub all_order_ids: Vec<Uuid>,
    pub partition_errors: Vec<PartitionError>,
    /// Items dropped from partitioning, reported so the caller can decide
    /// whether silent dropping is acceptable for its product
    pub unresolved_items: Vec<UnresolvedItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = CartLineItem {
            product_id: "p1".to_string(),
            name: "Masala Dosa".to_string(),
            unit_price: 10_000,
            quantity: 3,
        };
        assert_eq!(item.line_total(), 30_000);
    }

    #[test]
    fn test_group_subtotal() {
        let group = VendorGroup {
            vendor_id: "vendor-a".to_string(),
            items: vec![
                CartLineItem {
                    product_id: "p1".to_string(),
                    name: "Idli".to_string(),
                    unit_price: 4_000,
                    quantity: 2,
                },
                CartLineItem {
                    product_id: "p2".to_string(),
                    name: "Vada".to_string(),
                    unit_price: 3_000,
                    quantity: 1,
                },
            ],
        };
        assert_eq!(group.subtotal(), 11_000);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::OutForDelivery,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("shipped"), None);
    }
}
