//! Fixed-point currency handling and order totals.
//!
//! Amounts are stored as `i64` hundredths and handled as [`Decimal`] with
//! scale 2 everywhere else. Totals are accumulated in `Decimal`, never in
//! floating point.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use crate::models::OrderItem;

/// Number of decimal places carried by every stored amount.
pub const SCALE: u32 = 2;

/// Largest storable currency amount (10 digits, 2 of them decimals).
pub const MAX_PRICE_MINOR: i64 = 99_999_999_99;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} must have at most 2 decimal places")]
    TooPrecise { field: &'static str },

    #[error("{field} must not exceed 99999999.99")]
    TooLarge { field: &'static str },

    #[error("quantity must be greater than 0")]
    NonPositiveQuantity,
}

/// Converts an amount with at most two decimals into hundredths.
///
/// The sign is not checked; see [`price_to_minor`] for currency values.
pub fn to_minor(amount: Decimal, field: &'static str) -> Result<i64, PriceError> {
    if amount.normalize().scale() > SCALE {
        return Err(PriceError::TooPrecise { field });
    }
    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(PriceError::TooLarge { field })?
        .trunc()
        .to_i64()
        .ok_or(PriceError::TooLarge { field })?;
    if minor.abs() > MAX_PRICE_MINOR {
        return Err(PriceError::TooLarge { field });
    }
    Ok(minor)
}

/// Validates a currency amount and converts it into hundredths.
pub fn price_to_minor(amount: Decimal, field: &'static str) -> Result<i64, PriceError> {
    if amount < Decimal::ZERO {
        return Err(PriceError::Negative { field });
    }
    to_minor(amount, field)
}

pub fn from_minor(minor: i64) -> Decimal {
    Decimal::new(minor, SCALE)
}

pub fn validate_quantity(quantity: i32) -> Result<i32, PriceError> {
    if quantity <= 0 {
        return Err(PriceError::NonPositiveQuantity);
    }
    Ok(quantity)
}

/// `quantity * price` for a single line.
pub fn compute_item_total(quantity: i32, price: Decimal) -> Decimal {
    Decimal::from(quantity) * price
}

/// Sum of every line total of an order.
pub fn compute_total(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .map(|item| compute_item_total(item.quantity, item.price))
        .sum::<Decimal>()
        .round_dp(SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: i32, price: &str) -> OrderItem {
        OrderItem {
            id: 1,
            order_id: 1,
            product_id: 1,
            quantity,
            price: dec(price),
            total_price: compute_item_total(quantity, dec(price)),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn item_total_is_quantity_times_price() {
        assert_eq!(compute_item_total(3, dec("9.99")), dec("29.97"));
        assert_eq!(compute_item_total(1, dec("0.00")), dec("0.00"));
    }

    #[test]
    fn total_sums_lines_exactly() {
        let items = vec![item(2, "5.00"), item(1, "10.00")];
        assert_eq!(compute_total(&items), dec("20.00"));
    }

    #[test]
    fn total_of_many_cents_does_not_drift() {
        // 0.1 + 0.2 style inputs accumulate exactly.
        let items: Vec<OrderItem> = (0..1000).map(|_| item(1, "0.10")).collect();
        assert_eq!(compute_total(&items), dec("100.00"));

        let items = vec![item(7, "0.01"), item(3, "0.02"), item(1, "0.30")];
        assert_eq!(compute_total(&items), dec("0.43"));
    }

    #[test]
    fn total_of_empty_order_is_zero() {
        assert_eq!(compute_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn minor_units_round_trip() {
        assert_eq!(price_to_minor(dec("9.99"), "price"), Ok(999));
        assert_eq!(price_to_minor(dec("7.5"), "price"), Ok(750));
        assert_eq!(price_to_minor(dec("12"), "price"), Ok(1200));
        assert_eq!(from_minor(2997), dec("29.97"));
        assert_eq!(from_minor(2997).to_string(), "29.97");
    }

    #[test]
    fn trailing_zeros_beyond_scale_are_accepted() {
        assert_eq!(price_to_minor(dec("1.2500"), "price"), Ok(125));
    }

    #[test]
    fn rejects_invalid_prices() {
        assert_eq!(
            price_to_minor(dec("-0.01"), "price"),
            Err(PriceError::Negative { field: "price" })
        );
        assert_eq!(
            price_to_minor(dec("1.005"), "price"),
            Err(PriceError::TooPrecise { field: "price" })
        );
        assert_eq!(
            price_to_minor(dec("100000000.00"), "price"),
            Err(PriceError::TooLarge { field: "price" })
        );
        assert_eq!(price_to_minor(dec("99999999.99"), "price"), Ok(MAX_PRICE_MINOR));
    }

    #[test]
    fn amounts_beyond_decimal_range_are_too_large() {
        assert_eq!(
            price_to_minor(Decimal::MAX, "price"),
            Err(PriceError::TooLarge { field: "price" })
        );
        assert_eq!(
            price_to_minor(dec("79228162514264337593543950335"), "price"),
            Err(PriceError::TooLarge { field: "price" })
        );
        assert_eq!(
            to_minor(Decimal::MIN, "min_price"),
            Err(PriceError::TooLarge { field: "min_price" })
        );
    }

    #[test]
    fn signed_amounts_allowed_without_price_rules() {
        assert_eq!(to_minor(dec("-5.25"), "discount_percentage"), Ok(-525));
    }

    #[test]
    fn quantity_must_be_positive() {
        assert_eq!(validate_quantity(1), Ok(1));
        assert_eq!(validate_quantity(0), Err(PriceError::NonPositiveQuantity));
        assert_eq!(validate_quantity(-4), Err(PriceError::NonPositiveQuantity));
    }
}
