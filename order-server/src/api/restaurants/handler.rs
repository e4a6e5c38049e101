//! Restaurant API Handlers

use axum::extract::{Path, State};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{MenuItemRef, Restaurant};

use crate::core::ServerState;

/// List all restaurants
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Restaurant>>> {
    let restaurants = state.catalog.list_restaurants().await?;
    Ok(ApiResponse::success(restaurants))
}

/// Get one restaurant by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Restaurant>> {
    let restaurant = state.catalog.get_restaurant(&id).await?.ok_or_else(|| {
        AppError::new(ErrorCode::RestaurantNotFound).with_detail("restaurantId", id.clone())
    })?;
    Ok(ApiResponse::success(restaurant))
}

/// Menu for one restaurant
pub async fn menu(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<MenuItemRef>>> {
    if !state.catalog.restaurant_exists(&id).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound).with_detail("restaurantId", id));
    }
    let items = state.catalog.list_menu_items(&id).await?;
    Ok(ApiResponse::success(items))
}
