//! Order Model
//!
//! The order aggregate and its fulfillment state machine. An order is
//! created once, advances `status` along the fixed transition graph, and
//! keeps every other field frozen from creation onward.

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Fulfillment status of an order
///
/// Legal transitions form a straight line with a cancellation escape:
///
/// ```text
/// Pending → Confirmed → Preparing → OutForDelivery → Delivered
///     \         \           \            \
///      +---------+-----------+------------+--→ Cancelled
/// ```
///
/// `Delivered` and `Cancelled` are terminal. There are no self-loops.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether `next` is directly reachable from this status
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Preparing)
                | (Preparing, OutForDelivery)
                | (OutForDelivery, Delivered)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Preparing, Cancelled)
                | (OutForDelivery, Cancelled)
        )
    }

    /// Terminal statuses admit no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Wire representation (matches the stored/API string)
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment mode declared at checkout
///
/// Only recorded, never charged here. Defaults to cash on delivery.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMode {
    #[default]
    #[serde(rename = "COD")]
    Cod,
    Online,
}

/// Order line item
///
/// A snapshot of the menu item at order time. Later price or name edits in
/// the catalog never alter this record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Menu item reference (String ID)
    pub menu_item_id: String,
    pub item_name: String,
    pub quantity: i32,
    /// Unit price in currency unit, frozen at order time
    pub price: f64,
}

/// Order aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Owner reference (String ID), immutable after creation
    pub user_id: String,
    /// Restaurant reference (String ID), immutable after creation
    pub restaurant_id: String,
    pub items: Vec<OrderItem>,
    /// Total amount in currency unit, computed server-side at creation
    pub total_amount: f64,
    pub status: OrderStatus,
    pub payment_mode: PaymentMode,
    /// Customer display name snapshotted from the verified identity
    pub customer_name: String,
    pub order_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
