//! Order lifecycle: placement, fulfillment transitions, and read views
//!
//! Write paths are [`place_order`] (creates an aggregate exactly once) and
//! [`set_status`] (advances fulfillment state along the legal graph). All
//! other fields are frozen after creation. Read paths return enriched
//! views, newest first.

pub mod placement;
pub mod storage;
pub mod transition;
pub mod views;

pub use placement::place_order;
pub use storage::{OrderStore, StoreError, StoreResult};
pub use transition::set_status;
pub use views::{list_all_orders, list_own_orders};
