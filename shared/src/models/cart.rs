//! Cart Model
//!
//! A cart line is client-held and ephemeral. The whole cart is scoped to a
//! single restaurant; that invariant is enforced by the cart assembler in
//! the client crate, not here.

use serde::{Deserialize, Serialize};

/// One prospective order line held in a cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Menu item reference (String ID)
    pub menu_item_id: String,
    pub item_name: String,
    /// Unit price in currency unit, as shown when the item was added
    pub price: f64,
    pub image: String,
    pub quantity: i32,
    /// Restaurant reference (String ID); all lines in a cart share it
    pub restaurant_id: String,
}
