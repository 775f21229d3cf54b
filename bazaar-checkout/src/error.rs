use bazaar_domain::models::PartitionError;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Cart has no items")]
    EmptyCart,

    /// A cart field breaks the money/quantity invariants (negative amount,
    /// zero quantity). Nothing is persisted.
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    /// No vendor group could be formed and the cart carried no vendor
    /// hint. Nothing was persisted.
    #[error("No vendor could be resolved for any cart item")]
    NoVendorResolvable,

    /// Every vendor group failed to persist. The checkout fails as a
    /// whole; per-group reasons are carried for diagnostics.
    #[error("All {attempted} sub-order writes failed")]
    AllWritesFailed {
        attempted: usize,
        errors: Vec<PartitionError>,
    },
}
