use axum::{
    extract::{Path, Query, State},
    Json,
};
use bazaar_domain::lifecycle;
use bazaar_domain::models::{OrderStatus, SubOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListOrdersParams {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// GET /v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<SubOrder>, AppError> {
    let order = state
        .store
        .get(order_id)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("Order {} not found", order_id)))?;
    Ok(Json(order))
}

/// GET /v1/orders?user_id=...
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListOrdersParams>,
) -> Result<Json<Vec<SubOrder>>, AppError> {
    let orders = state
        .store
        .list_for_user(&params.user_id)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    Ok(Json(orders))
}

/// POST /v1/orders/{id}/status
///
/// Validates the move against the order lifecycle before persisting it.
pub async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<SubOrder>, AppError> {
    let order = state
        .store
        .get(order_id)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("Order {} not found", order_id)))?;

    let next = lifecycle::transition(order.order_status, req.status)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state
        .store
        .update_status(order_id, next)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let updated = state
        .store
        .get(order_id)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("Order {} not found", order_id)))?;
    Ok(Json(updated))
}
