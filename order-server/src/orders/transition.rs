//! Fulfillment status transitions
//!
//! The legal graph lives on [`OrderStatus::can_transition_to`]; this module
//! applies it against the stored order inside one write transaction, so the
//! check always runs on the current committed status. Only `status` and
//! `updatedAt` change; every other field stays as created. The caller's
//! admin role is verified here too, not only in the route layer.

use crate::auth::CurrentUser;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderStatus};
use shared::types::now_millis;

use super::storage::OrderStore;

pub fn set_status(
    store: &OrderStore,
    caller: &CurrentUser,
    order_id: &str,
    next: OrderStatus,
) -> AppResult<Order> {
    if !caller.is_admin() {
        return Err(AppError::admin_required().with_detail("userId", caller.id.clone()));
    }

    let updated = store.update(order_id, |order| {
        if !order.status.can_transition_to(next) {
            return Err(AppError::new(ErrorCode::InvalidStatusTransition)
                .with_detail("orderId", order.id.clone())
                .with_detail("from", order.status.as_str())
                .with_detail("to", next.as_str()));
        }
        order.status = next;
        order.updated_at = now_millis();
        Ok(())
    })?;

    tracing::info!(order_id, status = %updated.status, "order status updated");
    Ok(updated)
}
