use std::collections::HashMap;

use bazaar_domain::models::{Cart, UnresolvedItem, VendorGroup};

use crate::error::CheckoutError;
use crate::resolver::Resolution;

/// Result of partitioning a cart: vendor groups in first-occurrence order
/// plus the items that could not be attributed to any vendor.
#[derive(Debug)]
pub struct PartitionOutcome {
    pub groups: Vec<VendorGroup>,
    pub unresolved: Vec<UnresolvedItem>,
}

/// Group the cart's items by resolved vendor.
///
/// Items are walked in cart order; a group is created the first time its
/// vendor appears, so group order equals first-occurrence order. That
/// ordering is load-bearing: it decides which group's id becomes the
/// primary order id downstream.
///
/// If no group can be formed, the cart's vendor hint (when present) claims
/// the whole cart as a single group; otherwise the checkout fails with
/// `NoVendorResolvable`.
pub fn partition(
    cart: &Cart,
    resolutions: &HashMap<String, Resolution>,
) -> Result<PartitionOutcome, CheckoutError> {
    let mut groups: Vec<VendorGroup> = Vec::new();
    let mut index_by_vendor: HashMap<String, usize> = HashMap::new();
    let mut unresolved: Vec<UnresolvedItem> = Vec::new();

    for item in &cart.items {
        match resolutions.get(&item.product_id) {
            Some(Resolution::Vendor(vendor_id)) => {
                let idx = *index_by_vendor.entry(vendor_id.clone()).or_insert_with(|| {
                    groups.push(VendorGroup {
                        vendor_id: vendor_id.clone(),
                        items: Vec::new(),
                    });
                    groups.len() - 1
                });
                groups[idx].items.push(item.clone());
            }
            Some(Resolution::Unresolved(reason)) => {
                unresolved.push(UnresolvedItem {
                    product_id: item.product_id.clone(),
                    reason: reason.clone(),
                });
            }
            None => {
                unresolved.push(UnresolvedItem {
                    product_id: item.product_id.clone(),
                    reason: "no resolution attempted".to_string(),
                });
            }
        }
    }

    if groups.is_empty() {
        match &cart.vendor_hint {
            Some(vendor_id) => {
                // Whole-cart fallback: the hint vendor takes every item.
                // Resolution failures stay in the diagnostics.
                groups.push(VendorGroup {
                    vendor_id: vendor_id.clone(),
                    items: cart.items.clone(),
                });
            }
            None => return Err(CheckoutError::NoVendorResolvable),
        }
    }

    Ok(PartitionOutcome { groups, unresolved })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_domain::models::{Address, CartLineItem, PaymentMethod};
    use uuid::Uuid;

    fn address() -> Address {
        Address {
            name: "Asha".to_string(),
            phone: "9800000000".to_string(),
            pincode: "560001".to_string(),
            city: "Bengaluru".to_string(),
            address_text: "12 MG Road".to_string(),
        }
    }

    fn cart(items: Vec<CartLineItem>, vendor_hint: Option<&str>) -> Cart {
        Cart {
            user_id: "user-1".to_string(),
            submission_id: Uuid::new_v4(),
            items,
            delivery_fee: 4_000,
            payment_method: PaymentMethod::Cod,
            address: address(),
            vendor_hint: vendor_hint.map(|v| v.to_string()),
        }
    }

    fn item(product_id: &str) -> CartLineItem {
        CartLineItem {
            product_id: product_id.to_string(),
            name: product_id.to_string(),
            unit_price: 5_000,
            quantity: 1,
        }
    }

    fn resolved(pairs: &[(&str, &str)]) -> HashMap<String, Resolution> {
        pairs
            .iter()
            .map(|(p, v)| (p.to_string(), Resolution::Vendor(v.to_string())))
            .collect()
    }

    #[test]
    fn test_groups_follow_first_occurrence_order() {
        let cart = cart(
            vec![item("p1"), item("p2"), item("p3"), item("p4")],
            None,
        );
        let resolutions = resolved(&[
            ("p1", "vendor-b"),
            ("p2", "vendor-a"),
            ("p3", "vendor-b"),
            ("p4", "vendor-a"),
        ]);

        let outcome = partition(&cart, &resolutions).unwrap();

        assert_eq!(outcome.groups.len(), 2);
        assert_eq!(outcome.groups[0].vendor_id, "vendor-b");
        assert_eq!(outcome.groups[1].vendor_id, "vendor-a");
        // Per-vendor item order preserved
        assert_eq!(outcome.groups[0].items[0].product_id, "p1");
        assert_eq!(outcome.groups[0].items[1].product_id, "p3");
    }

    #[test]
    fn test_resolvable_items_are_covered_exactly_once() {
        let cart = cart(vec![item("p1"), item("p2"), item("p3")], None);
        let resolutions = resolved(&[("p1", "a"), ("p2", "b"), ("p3", "a")]);

        let outcome = partition(&cart, &resolutions).unwrap();

        let grouped: usize = outcome.groups.iter().map(|g| g.items.len()).sum();
        assert_eq!(grouped, 3);
        assert!(outcome.unresolved.is_empty());
    }

    #[test]
    fn test_unresolved_items_are_excluded_and_reported() {
        let cart = cart(vec![item("p1"), item("p2")], None);
        let mut resolutions = resolved(&[("p1", "a")]);
        resolutions.insert(
            "p2".to_string(),
            Resolution::Unresolved("vendor lookup failed: boom".to_string()),
        );

        let outcome = partition(&cart, &resolutions).unwrap();

        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].items.len(), 1);
        assert_eq!(outcome.unresolved.len(), 1);
        assert_eq!(outcome.unresolved[0].product_id, "p2");
    }

    #[test]
    fn test_whole_cart_fallback_on_vendor_hint() {
        let cart = cart(vec![item("p1"), item("p2")], Some("vendor-x"));
        let resolutions = HashMap::from([(
            "p1".to_string(),
            Resolution::Unresolved("no vendor association".to_string()),
        ), (
            "p2".to_string(),
            Resolution::Unresolved("no vendor association".to_string()),
        )]);

        let outcome = partition(&cart, &resolutions).unwrap();

        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].vendor_id, "vendor-x");
        assert_eq!(outcome.groups[0].items.len(), 2);
    }

    #[test]
    fn test_no_groups_and_no_hint_fails() {
        let cart = cart(vec![item("p1")], None);
        let resolutions = HashMap::from([(
            "p1".to_string(),
            Resolution::Unresolved("no vendor association".to_string()),
        )]);

        let err = partition(&cart, &resolutions).unwrap_err();
        assert!(matches!(err, CheckoutError::NoVendorResolvable));
    }
}
