//! Domain models for the ordering platform

pub mod cart;
pub mod catalog;
pub mod order;

pub use cart::CartLine;
pub use catalog::{MenuItemRef, Restaurant};
pub use order::{Order, OrderItem, OrderStatus, PaymentMode};
