#![allow(dead_code)]

use std::str::FromStr;

use quoting_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        customers::CreateCustomerRequest,
        orders::{CreateOrderRequest, OrderItemInput},
        products::CreateProductRequest,
    },
    models::{Customer, Order, Product},
    services::{customer_service, order_service, product_service},
    state::AppState,
};
use rust_decimal::Decimal;

/// Fresh in-memory database with every migration applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState { orm })
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

pub async fn create_product(state: &AppState, sku: &str, base_price: &str) -> Product {
    product_service::create_product(
        state,
        CreateProductRequest {
            name: format!("Product {sku}"),
            description: Some("test product".into()),
            sku: sku.into(),
            base_price: dec(base_price),
        },
    )
    .await
    .expect("create product")
    .data
    .expect("product data")
}

pub async fn create_customer(state: &AppState, name: &str, email: Option<&str>) -> Customer {
    customer_service::create_customer(
        state,
        CreateCustomerRequest {
            name: name.into(),
            email: email.map(Into::into),
            phone: None,
            company_id: None,
        },
    )
    .await
    .expect("create customer")
    .data
    .expect("customer data")
}

pub fn line(product_id: i32, quantity: i32, price: &str) -> OrderItemInput {
    OrderItemInput {
        product_id,
        quantity,
        price: dec(price),
    }
}

pub async fn create_order(
    state: &AppState,
    customer_id: i32,
    items: Vec<OrderItemInput>,
) -> Order {
    order_service::create_order(state, CreateOrderRequest { customer_id, items })
        .await
        .expect("create order")
        .data
        .expect("order data")
}
