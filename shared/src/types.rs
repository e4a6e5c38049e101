//! Common types for the shared crate
//!
//! Utility types used across the platform

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Current time as a [`Timestamp`]
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Role string for administrative users
pub const ROLE_ADMIN: &str = "admin";

/// Role string for ordinary customers
pub const ROLE_CUSTOMER: &str = "customer";
