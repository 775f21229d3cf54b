use crate::models::OrderStatus;

/// Validates vendor/admin status transitions on a sub-order.
///
/// The checkout engine itself only ever creates sub-orders in `Pending`;
/// everything after that comes through here.
pub fn transition(from: OrderStatus, to: OrderStatus) -> Result<OrderStatus, LifecycleError> {
    if can_transition(from, to) {
        Ok(to)
    } else {
        Err(LifecycleError::InvalidTransition {
            from: from.as_str(),
            to: to.as_str(),
        })
    }
}

/// Allowed moves: pending → confirmed → preparing → ready →
/// out_for_delivery → delivered, plus pending|confirmed → cancelled.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Confirmed, Preparing)
            | (Preparing, Ready)
            | (Ready, OutForDelivery)
            | (OutForDelivery, Delivered)
            | (Pending, Cancelled)
            | (Confirmed, Cancelled)
    )
}

pub fn is_terminal(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled)
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}
