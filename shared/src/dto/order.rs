//! Order API payloads

use crate::models::{Order, OrderItem, OrderStatus, PaymentMode};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/orders`
///
/// `items` already carry the name/price snapshot taken by the client cart;
/// the server re-validates every line and recomputes the total. A declared
/// `totalAmount` is cross-checked only, never persisted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    /// Restaurant reference (String ID)
    pub restaurant_id: String,
    pub items: Vec<OrderItem>,
    /// Client-declared total, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    /// Defaults to COD when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<PaymentMode>,
}

/// Body of `PUT /api/orders/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Restaurant display info attached to order list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantBrief {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// One order in a list response, enriched with restaurant display info
///
/// The customer display name ships inside the flattened order
/// (`customerName`), so the admin view needs no extra lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<RestaurantBrief>,
}
