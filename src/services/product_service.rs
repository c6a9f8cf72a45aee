use crate::{
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult, conflict_on_unique},
    models::Product,
    pricing::{price_to_minor, to_minor},
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    services::{now, optional_text, required_text},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

const NAME_MAX: usize = 255;
const SKU_MAX: usize = 100;

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(Column::Name.contains(search))
                .add(Column::Sku.contains(search))
                .add(Column::Description.contains(search)),
        );
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::BasePrice.gte(to_minor(min_price, "min_price")?));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::BasePrice.lte(to_minor(max_price, "max_price")?));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::BasePrice,
        ProductSortBy::Name => Column::Name,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col).order_by_asc(Column::Id),
        SortOrder::Desc => finder.order_by_desc(sort_col).order_by_desc(Column::Id),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    let data = ProductList { items };
    Ok(ApiResponse::success("Products", data, Some(meta)))
}

async fn find_product(state: &AppState, id: i32) -> AppResult<ProductModel> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Product", id))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = find_product(state, id).await?;
    Ok(ApiResponse::success("Product", Product::from(product), None))
}

/// Lookup by natural key.
pub async fn get_product_by_sku(state: &AppState, sku: &str) -> AppResult<ApiResponse<Product>> {
    let product = Products::find()
        .filter(Column::Sku.eq(sku))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Product", sku))?;
    Ok(ApiResponse::success("Product", Product::from(product), None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let name = required_text(&payload.name, "name", NAME_MAX)?;
    let sku = required_text(&payload.sku, "sku", SKU_MAX)?;
    let base_price = price_to_minor(payload.base_price, "base_price")?;
    let description = optional_text(payload.description.as_deref(), "description", usize::MAX)?;

    let now = now();
    let conflict = format!("A product named '{name}' or with sku '{sku}' already exists");
    let product = ActiveModel {
        id: NotSet,
        name: Set(name),
        description: Set(description),
        sku: Set(sku),
        base_price: Set(base_price),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await
    .map_err(conflict_on_unique(conflict))?;

    tracing::info!(product_id = product.id, sku = %product.sku, "product created");

    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = find_product(state, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required_text(&name, "name", NAME_MAX)?);
    }
    if let Some(description) = payload.description {
        active.description = Set(optional_text(Some(&description), "description", usize::MAX)?);
    }
    if let Some(sku) = payload.sku {
        active.sku = Set(required_text(&sku, "sku", SKU_MAX)?);
    }
    if let Some(base_price) = payload.base_price {
        active.base_price = Set(price_to_minor(base_price, "base_price")?);
    }
    active.updated_at = Set(now());

    let product = active
        .update(&state.orm)
        .await
        .map_err(conflict_on_unique("Another product already uses this name or sku"))?;

    tracing::info!(product_id = product.id, "product updated");

    Ok(ApiResponse::success(
        "Updated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Product", id));
    }

    tracing::info!(product_id = id, "product deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

/// Copies a product under a derived name and sku so it can be edited.
pub async fn duplicate_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let original = find_product(state, id).await?;

    let name = required_text(&format!("Copy of {}", original.name), "name", NAME_MAX)?;
    let sku = required_text(&format!("{}-copy", original.sku), "sku", SKU_MAX)?;

    let now = now();
    let conflict = format!("A copy of product '{}' already exists", original.sku);
    let product = ActiveModel {
        id: NotSet,
        name: Set(name),
        description: Set(original.description.clone()),
        sku: Set(sku),
        base_price: Set(original.base_price),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await
    .map_err(conflict_on_unique(conflict))?;

    tracing::info!(
        source_product_id = original.id,
        product_id = product.id,
        "product duplicated"
    );

    Ok(ApiResponse::success(
        "Product duplicated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}
