//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic goes through `Decimal`; `f64` is only the
//! storage/wire representation. Totals are recomputed here on the server;
//! a client-declared total is never the persisted figure.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{CartLine, OrderItem};
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price per item
pub const MAX_PRICE: f64 = 100_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 1_000;
/// Maximum length for snapshotted item names
pub const MAX_NAME_LEN: usize = 200;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::OrderItemInvalid,
            format!("{} must be a finite number, got {}", field_name, value),
        )
        .with_detail("field", field_name));
    }
    Ok(())
}

/// Validate an order line before it is snapshotted into an order
pub fn validate_order_item(item: &OrderItem) -> AppResult<()> {
    if item.menu_item_id.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderItemInvalid,
            "menuItemId is required",
        )
        .with_detail("field", "menuItemId"));
    }
    if item.item_name.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderItemInvalid,
            "itemName is required",
        )
        .with_detail("field", "itemName"));
    }
    if item.item_name.len() > MAX_NAME_LEN {
        return Err(AppError::with_message(
            ErrorCode::OrderItemInvalid,
            format!(
                "itemName is too long ({} chars, max {})",
                item.item_name.len(),
                MAX_NAME_LEN
            ),
        )
        .with_detail("field", "itemName"));
    }

    require_finite(item.price, "price")?;
    if item.price < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::OrderItemInvalid,
            format!("price must be non-negative, got {}", item.price),
        )
        .with_detail("field", "price"));
    }
    if item.price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::OrderItemInvalid,
            format!(
                "price exceeds maximum allowed ({}), got {}",
                MAX_PRICE, item.price
            ),
        )
        .with_detail("field", "price"));
    }

    if item.quantity < 1 {
        return Err(AppError::with_message(
            ErrorCode::OrderItemInvalid,
            format!("quantity must be positive, got {}", item.quantity),
        )
        .with_detail("field", "quantity"));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::OrderItemInvalid,
            format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, item.quantity
            ),
        )
        .with_detail("field", "quantity"));
    }

    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `require_finite()` at the
/// boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent data corruption.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Total for one line (price × quantity), unrounded
#[inline]
pub fn line_total(price: f64, quantity: i32) -> Decimal {
    to_decimal(price) * Decimal::from(quantity)
}

/// Total amount for a set of order lines, rounded to 2 decimal places
pub fn order_total(items: &[OrderItem]) -> f64 {
    let sum: Decimal = items
        .iter()
        .map(|i| line_total(i.price, i.quantity))
        .sum();
    to_f64(sum)
}

/// Total amount for a cart, rounded to 2 decimal places
pub fn cart_total(lines: &[CartLine]) -> f64 {
    let sum: Decimal = lines
        .iter()
        .map(|l| line_total(l.price, l.quantity))
        .sum();
    to_f64(sum)
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            menu_item_id: "m1".into(),
            item_name: "Test item".into(),
            quantity,
            price,
        }
    }

    #[test]
    fn test_order_total_simple() {
        let items = vec![item(5.00, 2), item(3.50, 1)];
        assert_eq!(order_total(&items), 13.50);
    }

    #[test]
    fn test_order_total_avoids_float_drift() {
        // 0.1 + 0.2 is 0.30000000000000004 in naive f64 arithmetic
        let items = vec![item(0.1, 1), item(0.2, 1)];
        assert_eq!(order_total(&items), 0.3);
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(&[]), 0.0);
    }

    #[test]
    fn test_money_eq_tolerance() {
        assert!(money_eq(13.50, 13.50));
        assert!(money_eq(13.50, 13.495));
        assert!(!money_eq(13.50, 13.4));
        assert!(!money_eq(13.50, 13.51));
    }

    #[test]
    fn test_validate_rejects_blank_ids() {
        let mut i = item(5.0, 1);
        i.menu_item_id = "  ".into();
        let err = validate_order_item(&i).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderItemInvalid);

        let mut i = item(5.0, 1);
        i.item_name = String::new();
        assert!(validate_order_item(&i).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_name() {
        let mut i = item(5.0, 1);
        i.item_name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_order_item(&i).is_err());

        let mut i = item(5.0, 1);
        i.item_name = "x".repeat(MAX_NAME_LEN);
        assert!(validate_order_item(&i).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_quantity() {
        assert!(validate_order_item(&item(5.0, 0)).is_err());
        assert!(validate_order_item(&item(5.0, -3)).is_err());
        assert!(validate_order_item(&item(5.0, MAX_QUANTITY + 1)).is_err());
        assert!(validate_order_item(&item(5.0, MAX_QUANTITY)).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_price() {
        assert!(validate_order_item(&item(-0.01, 1)).is_err());
        assert!(validate_order_item(&item(f64::NAN, 1)).is_err());
        assert!(validate_order_item(&item(f64::INFINITY, 1)).is_err());
        assert!(validate_order_item(&item(MAX_PRICE + 1.0, 1)).is_err());
        // Zero-price items (promotions) are allowed
        assert!(validate_order_item(&item(0.0, 1)).is_ok());
    }

    #[test]
    fn test_to_f64_rounds_to_cents() {
        let d = Decimal::new(13505, 3); // 13.505
        assert_eq!(to_f64(d), 13.51);
        let d = Decimal::new(13504, 3); // 13.504
        assert_eq!(to_f64(d), 13.5);
    }
}
