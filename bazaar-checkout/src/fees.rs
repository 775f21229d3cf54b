use bazaar_domain::models::{Paise, VendorGroup};

/// Split a flat delivery fee evenly across vendor groups.
///
/// The policy is an equal split, not weighted by subtotal. Integer
/// division leaves a remainder of up to N-1 paise; the whole remainder
/// goes to the group with the largest subtotal (ties broken by
/// first-occurrence order) so the shares always sum back to the fee
/// exactly.
pub fn allocate(delivery_fee: Paise, groups: &[VendorGroup]) -> Vec<Paise> {
    if groups.is_empty() {
        return Vec::new();
    }

    let n = groups.len() as i64;
    let share = delivery_fee / n;
    let remainder = delivery_fee % n;

    let mut shares = vec![share; groups.len()];

    if remainder > 0 {
        let mut holder = 0;
        for (idx, group) in groups.iter().enumerate() {
            if group.subtotal() > groups[holder].subtotal() {
                holder = idx;
            }
        }
        shares[holder] += remainder;
    }

    shares
}
