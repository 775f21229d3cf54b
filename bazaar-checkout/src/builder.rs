use bazaar_domain::models::{Cart, OrderStatus, Paise, PaymentStatus, SubOrder, VendorGroup};
use chrono::Utc;

/// Assemble the persistable sub-order for one vendor group. Pure: no id
/// yet, no side effects; the store assigns the id on insert.
pub fn build_sub_order(cart: &Cart, group: &VendorGroup, fee_share: Paise) -> SubOrder {
    let subtotal = group.subtotal();
    let now = Utc::now();

    SubOrder {
        id: None,
        user_id: cart.user_id.clone(),
        vendor_id: group.vendor_id.clone(),
        items: group.items.clone(),
        subtotal,
        delivery_fee_share: fee_share,
        total_amount: subtotal + fee_share,
        payment_method: cart.payment_method,
        payment_status: PaymentStatus::Pending,
        order_status: OrderStatus::Pending,
        address: cart.address.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_domain::models::{Address, CartLineItem, PaymentMethod};
    use uuid::Uuid;

    #[test]
    fn test_builds_priced_sub_order() {
        // Vendor A's slice of Scenario A: ₹100 × 2 with a ₹20 fee share
        let cart = Cart {
            user_id: "user-1".to_string(),
            submission_id: Uuid::new_v4(),
            items: vec![],
            delivery_fee: 4_000,
            payment_method: PaymentMethod::Online,
            address: Address {
                name: "Asha".to_string(),
                phone: "9800000000".to_string(),
                pincode: "560001".to_string(),
                city: "Bengaluru".to_string(),
                address_text: "12 MG Road".to_string(),
            },
            vendor_hint: None,
        };
        let group = VendorGroup {
            vendor_id: "vendor-a".to_string(),
            items: vec![CartLineItem {
                product_id: "p1".to_string(),
                name: "Thali".to_string(),
                unit_price: 10_000,
                quantity: 2,
            }],
        };

        let sub_order = build_sub_order(&cart, &group, 2_000);

        assert_eq!(sub_order.id, None);
        assert_eq!(sub_order.subtotal, 20_000);
        assert_eq!(sub_order.delivery_fee_share, 2_000);
        assert_eq!(sub_order.total_amount, 22_000);
        assert_eq!(sub_order.payment_status, PaymentStatus::Pending);
        assert_eq!(sub_order.order_status, OrderStatus::Pending);
        assert_eq!(sub_order.payment_method, PaymentMethod::Online);
        assert_eq!(sub_order.vendor_id, "vendor-a");
        assert_eq!(sub_order.items.len(), 1);
    }
}
