//! Catalog Models
//!
//! Read-side views of the restaurant catalog. The catalog is owned by an
//! external service; the order core only reads restaurant references for
//! enrichment and menu items for snapshotting at order time.

use serde::{Deserialize, Serialize};

/// Restaurant entity (read model)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub image: String,
}

/// Menu item entity (read model)
///
/// Source of the name/price snapshot copied into an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemRef {
    pub id: String,
    pub item_name: String,
    /// Unit price in currency unit (> 0)
    pub price: f64,
    pub category: String,
    pub image: String,
    /// Restaurant reference (String ID)
    pub restaurant_id: String,
}
