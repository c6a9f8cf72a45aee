use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{CustomerSpecificPrice, CustomerTier};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerTierRequest {
    pub name: String,
    #[schema(value_type = String, example = "10.00")]
    pub discount_percentage: Decimal,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CustomerTierList {
    #[schema(value_type = Vec<CustomerTier>)]
    pub items: Vec<CustomerTier>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerPriceRequest {
    pub customer_id: i32,
    pub product_id: i32,
    #[schema(value_type = String, example = "8.50")]
    pub custom_price: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCustomerPriceRequest {
    #[schema(value_type = String, example = "8.25")]
    pub custom_price: Decimal,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CustomerPriceList {
    #[schema(value_type = Vec<CustomerSpecificPrice>)]
    pub items: Vec<CustomerSpecificPrice>,
}
