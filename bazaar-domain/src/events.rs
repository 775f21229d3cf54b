use uuid::Uuid;

use crate::models::Paise;

/// Payload delivered to a vendor when a sub-order lands for them
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct VendorOrderNotification {
    pub vendor_id: String,
    pub order_id: Uuid,
    /// Short human-readable reference shown to the vendor
    pub order_number: String,
    pub customer_name: String,
    pub total_amount: Paise,
}
