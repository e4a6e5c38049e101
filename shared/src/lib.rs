//! Shared types for the Bento ordering platform
//!
//! Common types used across the order server and client crates:
//! error codes, response structures, domain models, and DTOs.

pub mod dto;
pub mod error;
pub mod models;
pub mod money;
pub mod types;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{CartLine, MenuItemRef, Order, OrderItem, OrderStatus, PaymentMode, Restaurant};
