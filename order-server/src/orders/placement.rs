//! Order placement
//!
//! Converts a submitted cart payload into a durable order record. Every
//! check here runs before the write: an invalid submission never touches
//! storage. Item name and price are persisted as submitted (the snapshot),
//! so later menu edits never alter historical orders. The total is always
//! recomputed server-side; a client-declared figure is only compared
//! against it, never stored.

use crate::catalog::CatalogStore;
use shared::dto::PlaceOrderRequest;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderStatus};
use shared::money;
use shared::types::now_millis;
use uuid::Uuid;

use super::storage::OrderStore;

pub async fn place_order(
    store: &OrderStore,
    catalog: &CatalogStore,
    user_id: &str,
    customer_name: &str,
    request: PlaceOrderRequest,
) -> AppResult<Order> {
    if request.restaurant_id.trim().is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, "restaurantId is required")
                .with_detail("field", "restaurantId"),
        );
    }
    if request.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for item in &request.items {
        money::validate_order_item(item)?;
    }

    if !catalog.restaurant_exists(&request.restaurant_id).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound)
            .with_detail("restaurantId", request.restaurant_id.clone()));
    }

    // Items the catalog still knows must belong to the submitted restaurant.
    // Items it no longer knows are accepted as-is: they were valid when
    // carted and the order keeps its own snapshot.
    for item in &request.items {
        if let Some(menu_item) = catalog.get_menu_item(&item.menu_item_id).await? {
            if menu_item.restaurant_id != request.restaurant_id {
                return Err(AppError::new(ErrorCode::CrossRestaurantConflict)
                    .with_detail("menuItemId", item.menu_item_id.clone())
                    .with_detail("itemRestaurantId", menu_item.restaurant_id)
                    .with_detail("restaurantId", request.restaurant_id.clone()));
            }
        }
    }

    let computed = money::order_total(&request.items);
    if let Some(declared) = request.total_amount {
        if !money::money_eq(declared, computed) {
            tracing::warn!(
                user_id,
                declared,
                computed,
                "declared total diverges from computed total, persisting computed value"
            );
        }
    }

    let now = now_millis();
    let order = Order {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        restaurant_id: request.restaurant_id,
        items: request.items,
        total_amount: computed,
        status: OrderStatus::Pending,
        payment_mode: request.payment_mode.unwrap_or_default(),
        customer_name: customer_name.to_string(),
        order_date: now,
        created_at: now,
        updated_at: now,
    };

    store.insert(&order)?;
    tracing::info!(
        order_id = %order.id,
        user_id,
        total = order.total_amount,
        "order placed"
    );
    Ok(order)
}
