//! Request and response DTOs shared between server and clients

pub mod health;
pub mod order;

pub use health::HealthStatus;
pub use order::{OrderView, PlaceOrderRequest, RestaurantBrief, UpdateStatusRequest};
