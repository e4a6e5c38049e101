//! Cart assembler
//!
//! Client-held collection of prospective order lines, scoped to exactly one
//! restaurant at a time. Lines snapshot the menu item's name and price as
//! shown when added. Every mutation writes through to the session store so
//! a reload never loses the cart.

use shared::dto::PlaceOrderRequest;
use shared::models::{CartLine, MenuItemRef, OrderItem, PaymentMode};

use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Single-restaurant cart
///
/// The restaurant binding is carried by the lines themselves: the cart
/// belongs to whichever restaurant its first line references, and rebinds
/// on the next add once emptied.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    session: SessionStore,
}

impl Cart {
    /// Load the cart persisted in `session`, empty if none
    pub fn load(session: SessionStore) -> Self {
        let lines = session.load();
        Self { lines, session }
    }

    /// Restaurant this cart is bound to, `None` while empty
    pub fn restaurant_id(&self) -> Option<&str> {
        self.lines.first().map(|l| l.restaurant_id.as_str())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a menu item
    ///
    /// Fails with [`ClientError::CrossRestaurantConflict`] when the item
    /// belongs to a different restaurant than the cart; the cart is left
    /// untouched in that case. An item already in the cart has its quantity
    /// incremented instead of gaining a second line.
    pub fn add_item(&mut self, item: &MenuItemRef) -> ClientResult<()> {
        if let Some(current) = self.restaurant_id() {
            if current != item.restaurant_id {
                return Err(ClientError::CrossRestaurantConflict {
                    cart_restaurant: current.to_string(),
                    item_restaurant: item.restaurant_id.clone(),
                });
            }
        }

        match self.lines.iter_mut().find(|l| l.menu_item_id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                menu_item_id: item.id.clone(),
                item_name: item.item_name.clone(),
                price: item.price,
                image: item.image.clone(),
                quantity: 1,
                restaurant_id: item.restaurant_id.clone(),
            }),
        }

        self.persist()
    }

    /// Set a line's quantity; anything below 1 removes the line
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: i32) -> ClientResult<()> {
        if quantity < 1 {
            self.lines.retain(|l| l.menu_item_id != menu_item_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.menu_item_id == menu_item_id) {
            line.quantity = quantity;
        }

        self.persist()
    }

    /// Remove a line; absent lines are a no-op
    pub fn remove_item(&mut self, menu_item_id: &str) -> ClientResult<()> {
        self.lines.retain(|l| l.menu_item_id != menu_item_id);
        self.persist()
    }

    /// Cart total (price × quantity over all lines)
    pub fn totals(&self) -> f64 {
        shared::money::cart_total(&self.lines)
    }

    /// Empty the cart (after a successful order submission)
    pub fn clear(&mut self) -> ClientResult<()> {
        self.lines.clear();
        self.persist()
    }

    /// Build the order submission payload for the current cart
    ///
    /// `None` while the cart is empty. The declared total is informational;
    /// the server recomputes it from the lines.
    pub fn checkout_request(&self, payment_mode: Option<PaymentMode>) -> Option<PlaceOrderRequest> {
        let restaurant_id = self.restaurant_id()?.to_string();
        let items = self
            .lines
            .iter()
            .map(|l| OrderItem {
                menu_item_id: l.menu_item_id.clone(),
                item_name: l.item_name.clone(),
                quantity: l.quantity,
                price: l.price,
            })
            .collect();

        Some(PlaceOrderRequest {
            restaurant_id,
            items,
            total_amount: Some(self.totals()),
            payment_mode,
        })
    }

    fn persist(&self) -> ClientResult<()> {
        self.session.save(&self.lines)
    }
}
