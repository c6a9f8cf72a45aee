use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Order;

/// One requested line: the caller supplies the unit price to snapshot.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderItemInput {
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = String, example = "9.99")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: i32,
    pub items: Vec<OrderItemInput>,
}

/// Omitted fields are left untouched; `items`, when present, replaces the
/// whole item set.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub customer_id: Option<i32>,
    pub items: Option<Vec<OrderItemInput>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderTotal {
    pub order_id: i32,
    pub item_count: usize,
    #[schema(value_type = String, example = "29.97")]
    pub total_price: Decimal,
}
