//! Order API Module
//!
//! Placement and own-order reads for any authenticated user; the global
//! listing and status transitions are admin-only.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    // 下单与本人订单：任何已认证用户
    let customer_routes = Router::new()
        .route("/", post(handler::create))
        .route("/myorders", get(handler::my_orders));

    // 管理路由：仅管理员可用
    let admin_routes = Router::new()
        .route("/", get(handler::list_all))
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_admin));

    customer_routes.merge(admin_routes)
}
