use bazaar_domain::models::{FulfillmentResult, PartitionError, UnresolvedItem};

use crate::error::CheckoutError;
use crate::writer::WriteOutcome;

/// Combine per-group write outcomes into the caller-facing result.
///
/// The primary order id belongs to the first successfully written group in
/// original group order (not write-completion order, which is arbitrary
/// under concurrent writes). Zero successes fail the checkout as a whole.
pub fn aggregate(
    outcomes: &[WriteOutcome],
    unresolved_items: Vec<UnresolvedItem>,
) -> Result<FulfillmentResult, CheckoutError> {
    let mut all_order_ids = Vec::new();
    let mut partition_errors = Vec::new();

    for outcome in outcomes {
        match &outcome.result {
            Ok(id) => all_order_ids.push(*id),
            Err(reason) => partition_errors.push(PartitionError {
                vendor_id: outcome.vendor_id.clone(),
                reason: reason.clone(),
            }),
        }
    }

    let primary_order_id = match all_order_ids.first() {
        Some(id) => *id,
        None => {
            return Err(CheckoutError::AllWritesFailed {
                attempted: outcomes.len(),
                errors: partition_errors,
            })
        }
    };

    Ok(FulfillmentResult {
        primary_order_id,
        order_count: all_order_ids.len(),
        all_order_ids,
        partition_errors,
        unresolved_items,
    })
}

/// The confirmation line shown to the customer after checkout
pub fn placement_message(order_count: usize) -> String {
    if order_count <= 1 {
        "Your order has been placed".to_string()
    } else {
        format!(
            "Your {} orders have been placed with different vendors",
            order_count
        )
    }
}
