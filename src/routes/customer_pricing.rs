use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::customer_pricing::{
        CreateCustomerPriceRequest, CreateCustomerTierRequest, CustomerPriceList,
        CustomerTierList, UpdateCustomerPriceRequest,
    },
    error::AppResult,
    models::{CustomerSpecificPrice, CustomerTier},
    response::ApiResponse,
    routes::params::{CustomerPriceQuery, Pagination},
    services::customer_pricing_service,
    state::AppState,
};

pub fn tier_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customer_tiers).post(create_customer_tier))
        .route("/{id}", get(get_customer_tier).delete(delete_customer_tier))
}

pub fn price_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customer_prices).post(create_customer_price))
        .route(
            "/{id}",
            get(get_customer_price)
                .put(update_customer_price)
                .delete(delete_customer_price),
        )
}

#[utoipa::path(
    get,
    path = "/api/customer-tiers",
    params(Pagination),
    responses(
        (status = 200, description = "List customer tiers", body = ApiResponse<CustomerTierList>)
    ),
    tag = "Customer pricing"
)]
pub async fn list_customer_tiers(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CustomerTierList>>> {
    let resp = customer_pricing_service::list_customer_tiers(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customer-tiers/{id}",
    params(("id" = i32, Path, description = "Tier ID")),
    responses(
        (status = 200, description = "Get customer tier", body = ApiResponse<CustomerTier>),
        (status = 404, description = "Tier not found"),
    ),
    tag = "Customer pricing"
)]
pub async fn get_customer_tier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<CustomerTier>>> {
    let resp = customer_pricing_service::get_customer_tier(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/customer-tiers",
    request_body = CreateCustomerTierRequest,
    responses(
        (status = 201, description = "Create customer tier", body = ApiResponse<CustomerTier>),
        (status = 409, description = "Name already in use"),
        (status = 422, description = "Invalid input"),
    ),
    tag = "Customer pricing"
)]
pub async fn create_customer_tier(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerTierRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CustomerTier>>)> {
    let resp = customer_pricing_service::create_customer_tier(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/customer-tiers/{id}",
    params(("id" = i32, Path, description = "Tier ID")),
    responses(
        (status = 200, description = "Deleted tier", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Tier not found"),
    ),
    tag = "Customer pricing"
)]
pub async fn delete_customer_tier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = customer_pricing_service::delete_customer_tier(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customer-prices",
    params(CustomerPriceQuery),
    responses(
        (status = 200, description = "List customer specific prices", body = ApiResponse<CustomerPriceList>)
    ),
    tag = "Customer pricing"
)]
pub async fn list_customer_prices(
    State(state): State<AppState>,
    Query(query): Query<CustomerPriceQuery>,
) -> AppResult<Json<ApiResponse<CustomerPriceList>>> {
    let resp = customer_pricing_service::list_customer_prices(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customer-prices/{id}",
    params(("id" = i32, Path, description = "Customer price ID")),
    responses(
        (status = 200, description = "Get customer price", body = ApiResponse<CustomerSpecificPrice>),
        (status = 404, description = "Customer price not found"),
    ),
    tag = "Customer pricing"
)]
pub async fn get_customer_price(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<CustomerSpecificPrice>>> {
    let resp = customer_pricing_service::get_customer_price(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/customer-prices",
    request_body = CreateCustomerPriceRequest,
    responses(
        (status = 201, description = "Create customer price", body = ApiResponse<CustomerSpecificPrice>),
        (status = 404, description = "Customer or product not found"),
        (status = 409, description = "Customer already has a price for this product"),
        (status = 422, description = "Invalid price"),
    ),
    tag = "Customer pricing"
)]
pub async fn create_customer_price(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerPriceRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CustomerSpecificPrice>>)> {
    let resp = customer_pricing_service::create_customer_price(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/customer-prices/{id}",
    params(("id" = i32, Path, description = "Customer price ID")),
    request_body = UpdateCustomerPriceRequest,
    responses(
        (status = 200, description = "Updated customer price", body = ApiResponse<CustomerSpecificPrice>),
        (status = 404, description = "Customer price not found"),
        (status = 422, description = "Invalid price"),
    ),
    tag = "Customer pricing"
)]
pub async fn update_customer_price(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCustomerPriceRequest>,
) -> AppResult<Json<ApiResponse<CustomerSpecificPrice>>> {
    let resp = customer_pricing_service::update_customer_price(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/customer-prices/{id}",
    params(("id" = i32, Path, description = "Customer price ID")),
    responses(
        (status = 200, description = "Deleted customer price", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Customer price not found"),
    ),
    tag = "Customer pricing"
)]
pub async fn delete_customer_price(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = customer_pricing_service::delete_customer_price(&state, id).await?;
    Ok(Json(resp))
}
