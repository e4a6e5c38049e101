//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::dto::{OrderView, PlaceOrderRequest, UpdateStatusRequest};
use shared::error::{ApiResponse, AppResult};
use shared::models::Order;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders;

/// Place a new order from the submitted cart payload
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<ApiResponse<Order>> {
    let order =
        orders::place_order(&state.orders, &state.catalog, &user.id, &user.name, payload).await?;
    Ok(ApiResponse::success_with_message("Order placed", order))
}

/// Orders owned by the calling user, newest first
pub async fn my_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<OrderView>>> {
    let views = orders::list_own_orders(&state.orders, &state.catalog, &user.id).await?;
    Ok(ApiResponse::success(views))
}

/// Every order in the store, newest first (admin)
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<OrderView>>> {
    let views = orders::list_all_orders(&state.orders, &state.catalog, &user).await?;
    Ok(ApiResponse::success(views))
}

/// Advance an order's fulfillment status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<ApiResponse<Order>> {
    let order = orders::set_status(&state.orders, &user, &id, payload.status)?;
    tracing::info!(
        admin_id = %user.id,
        order_id = %id,
        status = %order.status,
        "order status changed by admin"
    );
    Ok(ApiResponse::success_with_message("Status updated", order))
}
