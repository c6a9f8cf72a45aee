use axum::Router;

use crate::state::AppState;

pub mod companies;
pub mod customer_pricing;
pub mod customers;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/companies", companies::router())
        .nest("/customers", customers::router())
        .nest("/products", products::router())
        .nest("/customer-tiers", customer_pricing::tier_router())
        .nest("/customer-prices", customer_pricing::price_router())
        .nest("/orders", orders::router())
}
