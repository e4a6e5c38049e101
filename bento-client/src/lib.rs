//! Bento Client - HTTP client for the order server
//!
//! Provides network-based HTTP calls to the order API, plus the local cart
//! assembler with write-through session persistence.

pub mod cart;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use cart::Cart;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::SessionStore;

// Re-export shared types for convenience
pub use shared::dto::{HealthStatus, OrderView, PlaceOrderRequest, RestaurantBrief};
pub use shared::models::{CartLine, MenuItemRef, Order, OrderStatus, PaymentMode, Restaurant};
