//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 订单接口 (下单、查询、状态流转)
//! - [`restaurants`] - 餐厅/菜单接口 (公共只读)

use axum::Router;

use crate::core::ServerState;

pub mod health;
pub mod orders;
pub mod restaurants;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(restaurants::router())
}
