//! Order read views
//!
//! Owner-scoped and admin-wide listings, newest first, each joined with the
//! restaurant's display name and image from the catalog. A restaurant that
//! has since disappeared gets a placeholder brief instead of failing the
//! whole listing. Customer names ride on the order record itself. The
//! store-wide listing re-checks the caller's admin role before reading.

use crate::auth::CurrentUser;
use crate::catalog::CatalogStore;
use shared::dto::{OrderView, RestaurantBrief};
use shared::error::{AppError, AppResult};
use shared::models::Order;
use std::collections::HashMap;

use super::storage::OrderStore;

/// All orders owned by `user_id`, newest first
pub async fn list_own_orders(
    store: &OrderStore,
    catalog: &CatalogStore,
    user_id: &str,
) -> AppResult<Vec<OrderView>> {
    let mut orders = store.list_by_user(user_id)?;
    sort_newest_first(&mut orders);
    enrich(catalog, orders).await
}

/// Every order in the store, newest first. Admin callers only.
pub async fn list_all_orders(
    store: &OrderStore,
    catalog: &CatalogStore,
    caller: &CurrentUser,
) -> AppResult<Vec<OrderView>> {
    if !caller.is_admin() {
        return Err(AppError::admin_required().with_detail("userId", caller.id.clone()));
    }

    let mut orders = store.list_all()?;
    sort_newest_first(&mut orders);
    enrich(catalog, orders).await
}

fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

async fn enrich(catalog: &CatalogStore, orders: Vec<Order>) -> AppResult<Vec<OrderView>> {
    // One catalog lookup per distinct restaurant, not per order
    let mut briefs: HashMap<String, RestaurantBrief> = HashMap::new();
    let mut views = Vec::with_capacity(orders.len());

    for order in orders {
        if !briefs.contains_key(&order.restaurant_id) {
            let brief = match catalog.get_restaurant(&order.restaurant_id).await? {
                Some(r) => RestaurantBrief {
                    id: r.id,
                    name: r.name,
                    image: r.image,
                },
                None => RestaurantBrief {
                    id: order.restaurant_id.clone(),
                    name: "Unknown restaurant".to_string(),
                    image: String::new(),
                },
            };
            briefs.insert(order.restaurant_id.clone(), brief);
        }
        let restaurant = briefs.get(&order.restaurant_id).cloned();
        views.push(OrderView { order, restaurant });
    }
    Ok(views)
}
