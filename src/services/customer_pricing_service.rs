//! Customer tiers and per-customer product prices.
//!
//! Both are kept as reference data only: order creation never reads them.

use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::{
    dto::customer_pricing::{
        CreateCustomerPriceRequest, CreateCustomerTierRequest, CustomerPriceList,
        CustomerTierList, UpdateCustomerPriceRequest,
    },
    entity::{
        customer_specific_prices::{
            ActiveModel as PriceActive, Column as PriceCol, Entity as CustomerSpecificPrices,
            Model as PriceModel,
        },
        customer_tiers::{ActiveModel as TierActive, Column as TierCol, Entity as CustomerTiers},
        products::Entity as Products,
    },
    error::{AppError, AppResult, conflict_on_unique},
    models::{CustomerSpecificPrice, CustomerTier},
    pricing::{price_to_minor, to_minor},
    response::{ApiResponse, Meta},
    routes::params::{CustomerPriceQuery, Pagination},
    services::{now, order_service::find_customer, required_text},
    state::AppState,
};

const TIER_NAME_MAX: usize = 100;

pub async fn list_customer_tiers(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CustomerTierList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = CustomerTiers::find().order_by_asc(TierCol::Name);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(CustomerTier::from)
        .collect();

    Ok(ApiResponse::success(
        "Customer tiers",
        CustomerTierList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_customer_tier(state: &AppState, id: i32) -> AppResult<ApiResponse<CustomerTier>> {
    let tier = CustomerTiers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("CustomerTier", id))?;
    Ok(ApiResponse::success("Customer tier", CustomerTier::from(tier), None))
}

pub async fn create_customer_tier(
    state: &AppState,
    payload: CreateCustomerTierRequest,
) -> AppResult<ApiResponse<CustomerTier>> {
    let name = required_text(&payload.name, "name", TIER_NAME_MAX)?;
    // The 0-100 range is advisory; only the precision is enforced.
    let discount = to_minor(payload.discount_percentage, "discount_percentage")?;

    let now = now();
    let conflict = format!("A customer tier named '{name}' already exists");
    let tier = TierActive {
        id: NotSet,
        name: Set(name),
        discount_percentage: Set(discount),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await
    .map_err(conflict_on_unique(conflict))?;

    tracing::info!(tier_id = tier.id, "customer tier created");

    Ok(ApiResponse::success(
        "Customer tier created",
        CustomerTier::from(tier),
        Some(Meta::empty()),
    ))
}

pub async fn delete_customer_tier(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = CustomerTiers::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("CustomerTier", id));
    }

    tracing::info!(tier_id = id, "customer tier deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

async fn find_price(state: &AppState, id: i32) -> AppResult<PriceModel> {
    CustomerSpecificPrices::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("CustomerSpecificPrice", id))
}

pub async fn list_customer_prices(
    state: &AppState,
    query: CustomerPriceQuery,
) -> AppResult<ApiResponse<CustomerPriceList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(customer_id) = query.customer_id {
        condition = condition.add(PriceCol::CustomerId.eq(customer_id));
    }
    if let Some(product_id) = query.product_id {
        condition = condition.add(PriceCol::ProductId.eq(product_id));
    }

    let finder = CustomerSpecificPrices::find()
        .filter(condition)
        .order_by_asc(PriceCol::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(CustomerSpecificPrice::from)
        .collect();

    Ok(ApiResponse::success(
        "Customer prices",
        CustomerPriceList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_customer_price(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<CustomerSpecificPrice>> {
    let price = find_price(state, id).await?;
    Ok(ApiResponse::success(
        "Customer price",
        CustomerSpecificPrice::from(price),
        None,
    ))
}

pub async fn create_customer_price(
    state: &AppState,
    payload: CreateCustomerPriceRequest,
) -> AppResult<ApiResponse<CustomerSpecificPrice>> {
    let custom_price = price_to_minor(payload.custom_price, "custom_price")?;

    let customer = find_customer(&state.orm, payload.customer_id).await?;
    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Product", payload.product_id))?;

    let now = now();
    let conflict = format!(
        "Customer {} already has a specific price for product {}",
        customer.id, product.id
    );
    let price = PriceActive {
        id: NotSet,
        customer_id: Set(customer.id),
        product_id: Set(product.id),
        custom_price: Set(custom_price),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await
    .map_err(conflict_on_unique(conflict))?;

    tracing::info!(
        price_id = price.id,
        customer_id = customer.id,
        product_id = product.id,
        "customer price created"
    );

    Ok(ApiResponse::success(
        "Customer price created",
        CustomerSpecificPrice::from(price),
        Some(Meta::empty()),
    ))
}

pub async fn update_customer_price(
    state: &AppState,
    id: i32,
    payload: UpdateCustomerPriceRequest,
) -> AppResult<ApiResponse<CustomerSpecificPrice>> {
    let custom_price = price_to_minor(payload.custom_price, "custom_price")?;
    let existing = find_price(state, id).await?;

    let mut active: PriceActive = existing.into();
    active.custom_price = Set(custom_price);
    active.updated_at = Set(now());
    let price = active.update(&state.orm).await?;

    tracing::info!(price_id = price.id, "customer price updated");

    Ok(ApiResponse::success(
        "Updated",
        CustomerSpecificPrice::from(price),
        Some(Meta::empty()),
    ))
}

pub async fn delete_customer_price(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = CustomerSpecificPrices::delete_by_id(id)
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("CustomerSpecificPrice", id));
    }

    tracing::info!(price_id = id, "customer price deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}
