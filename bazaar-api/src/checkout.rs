use axum::{extract::State, Json};
use bazaar_checkout::aggregate::placement_message;
use bazaar_checkout::CheckoutError;
use bazaar_domain::models::{Cart, FulfillmentResult};
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub message: String,
    #[serde(flatten)]
    pub result: FulfillmentResult,
}

/// POST /v1/checkout
pub async fn create_order(
    State(state): State<AppState>,
    Json(cart): Json<Cart>,
) -> Result<Json<CheckoutResponse>, AppError> {
    info!(
        "Checkout for user {} with {} items",
        cart.user_id,
        cart.items.len()
    );

    match state.engine.create_order(&cart).await {
        Ok(result) => Ok(Json(CheckoutResponse {
            message: placement_message(result.order_count),
            result,
        })),
        Err(
            err @ (CheckoutError::EmptyCart
            | CheckoutError::InvalidCart(_)
            | CheckoutError::NoVendorResolvable),
        ) => Err(AppError::ValidationError(err.to_string())),
        Err(err @ CheckoutError::AllWritesFailed { .. }) => {
            Err(AppError::UpstreamError(err.to_string()))
        }
    }
}
