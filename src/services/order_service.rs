//! Order engine: creation, item replacement, deletion and duplication of
//! orders, plus totals computed from the stored line snapshots.
//!
//! Every mutation runs in a single transaction so readers never observe a
//! half-written item set.

use std::collections::{HashMap, HashSet};

use sea_orm::ActiveValue::NotSet;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::orders::{CreateOrderRequest, OrderItemInput, OrderList, OrderTotal, UpdateOrderRequest},
    entity::{
        customers::{Entity as Customers, Model as CustomerModel},
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{Order, OrderItem},
    pricing::{compute_total, price_to_minor, validate_quantity},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::now,
    state::AppState,
};

/// A validated line ready to be written: price already in hundredths.
#[derive(Debug, Clone, Copy)]
struct LineSnapshot {
    product_id: i32,
    quantity: i32,
    price: i64,
}

impl From<&OrderItemModel> for LineSnapshot {
    fn from(item: &OrderItemModel) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

fn validate_items(items: &[OrderItemInput]) -> AppResult<Vec<LineSnapshot>> {
    if items.is_empty() {
        return Err(AppError::Validation(
            "At least one order item is required".into(),
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let quantity = validate_quantity(item.quantity)
                .map_err(|e| AppError::Validation(format!("items[{idx}]: {e}")))?;
            let price = price_to_minor(item.price, "price")
                .map_err(|e| AppError::Validation(format!("items[{idx}]: {e}")))?;
            Ok(LineSnapshot {
                product_id: item.product_id,
                quantity,
                price,
            })
        })
        .collect()
}

pub(crate) async fn find_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: i32,
) -> AppResult<CustomerModel> {
    Customers::find_by_id(customer_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Customer", customer_id))
}

/// Fails with the first product id, in input order, that does not exist.
async fn ensure_products_exist<C: ConnectionTrait>(
    conn: &C,
    lines: &[LineSnapshot],
) -> AppResult<()> {
    let wanted: Vec<i32> = lines
        .iter()
        .map(|l| l.product_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let found: HashSet<i32> = Products::find()
        .select_only()
        .column(ProdCol::Id)
        .filter(ProdCol::Id.is_in(wanted))
        .into_tuple::<i32>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    match lines.iter().find(|l| !found.contains(&l.product_id)) {
        Some(missing) => Err(AppError::not_found("Product", missing.product_id)),
        None => Ok(()),
    }
}

async fn insert_items<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
    lines: &[LineSnapshot],
    created_at: DateTimeWithTimeZone,
) -> AppResult<Vec<OrderItemModel>> {
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let item = OrderItemActive {
            id: NotSet,
            order_id: Set(order_id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price: Set(line.price),
            created_at: Set(created_at),
        }
        .insert(conn)
        .await?;
        items.push(item);
    }
    Ok(items)
}

async fn load_items<C: ConnectionTrait>(conn: &C, order_id: i32) -> AppResult<Vec<OrderItemModel>> {
    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::Id)
        .all(conn)
        .await?;
    Ok(items)
}

/// Loads the items of every order in one query and assembles them.
async fn attach_items<C: ConnectionTrait>(conn: &C, orders: Vec<OrderModel>) -> AppResult<Vec<Order>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();

    let mut by_order: HashMap<i32, Vec<OrderItemModel>> = HashMap::new();
    for item in OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(ids))
        .order_by_asc(OrderItemCol::Id)
        .all(conn)
        .await?
    {
        by_order.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            Order::from_parts(order, items)
        })
        .collect())
}

async fn find_order<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<OrderModel> {
    Orders::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Order", id))
}

pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let lines = validate_items(&payload.items)?;

    let txn = state.orm.begin().await?;

    let customer = find_customer(&txn, payload.customer_id).await?;
    ensure_products_exist(&txn, &lines).await?;

    let now = now();
    let order = OrderActive {
        id: NotSet,
        customer_id: Set(customer.id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let items = insert_items(&txn, order.id, &lines, now).await?;

    txn.commit().await?;

    tracing::info!(
        order_id = order.id,
        customer_id = customer.id,
        items = items.len(),
        "order created"
    );

    Ok(ApiResponse::success(
        "Order created",
        Order::from_parts(order, items),
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    id: i32,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let lines = payload.items.as_deref().map(validate_items).transpose()?;

    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Order", id))?;

    let mut active: OrderActive = order.into();
    if let Some(customer_id) = payload.customer_id {
        let customer = find_customer(&txn, customer_id).await?;
        active.customer_id = Set(customer.id);
    }
    if let Some(lines) = &lines {
        ensure_products_exist(&txn, lines).await?;
    }

    let now = now();
    active.updated_at = Set(now);
    let order = active.update(&txn).await?;

    let items = match &lines {
        Some(lines) => {
            OrderItems::delete_many()
                .filter(OrderItemCol::OrderId.eq(order.id))
                .exec(&txn)
                .await?;
            insert_items(&txn, order.id, lines, now).await?
        }
        None => load_items(&txn, order.id).await?,
    };

    txn.commit().await?;

    tracing::info!(
        order_id = order.id,
        customer_id = order.customer_id,
        items_replaced = lines.is_some(),
        "order updated"
    );

    Ok(ApiResponse::success(
        "Order updated",
        Order::from_parts(order, items),
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let order = find_order(&txn, id).await?;

    let removed = OrderItems::delete_many()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .exec(&txn)
        .await?;
    Orders::delete_by_id(order.id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        order_id = order.id,
        items = removed.rows_affected,
        "order deleted"
    );

    Ok(ApiResponse::success(
        "Order deleted",
        serde_json::json!({ "id": order.id }),
        Some(Meta::empty()),
    ))
}

pub async fn duplicate_order(state: &AppState, id: i32) -> AppResult<ApiResponse<Order>> {
    let txn = state.orm.begin().await?;

    let source = find_order(&txn, id).await?;
    let lines: Vec<LineSnapshot> = load_items(&txn, source.id)
        .await?
        .iter()
        .map(LineSnapshot::from)
        .collect();

    let now = now();
    let order = OrderActive {
        id: NotSet,
        customer_id: Set(source.customer_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let items = insert_items(&txn, order.id, &lines, now).await?;

    txn.commit().await?;

    tracing::info!(
        source_order_id = source.id,
        order_id = order.id,
        items = items.len(),
        "order duplicated"
    );

    Ok(ApiResponse::success(
        "Order duplicated",
        Order::from_parts(order, items),
        Some(Meta::empty()),
    ))
}

pub async fn get_order(state: &AppState, id: i32) -> AppResult<ApiResponse<Order>> {
    let order = find_order(&state.orm, id).await?;
    let items = load_items(&state.orm, order.id).await?;

    Ok(ApiResponse::success(
        "OK",
        Order::from_parts(order, items),
        Some(Meta::empty()),
    ))
}

pub async fn get_order_total(state: &AppState, id: i32) -> AppResult<ApiResponse<OrderTotal>> {
    let order = find_order(&state.orm, id).await?;
    let items: Vec<OrderItem> = load_items(&state.orm, order.id)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderTotal {
            order_id: order.id,
            item_count: items.len(),
            total_price: compute_total(&items),
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(customer_id) = query.customer_id {
        condition = condition.add(OrderCol::CustomerId.eq(customer_id));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder
            .order_by_asc(OrderCol::CreatedAt)
            .order_by_asc(OrderCol::Id),
        SortOrder::Desc => finder
            .order_by_desc(OrderCol::CreatedAt)
            .order_by_desc(OrderCol::Id),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let orders = attach_items(&state.orm, rows).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Every order of one customer, oldest first.
pub async fn get_orders_for_customer(
    state: &AppState,
    customer_id: i32,
) -> AppResult<ApiResponse<OrderList>> {
    let customer = find_customer(&state.orm, customer_id).await?;

    let rows = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer.id))
        .order_by_asc(OrderCol::CreatedAt)
        .order_by_asc(OrderCol::Id)
        .all(&state.orm)
        .await?;
    let orders = attach_items(&state.orm, rows).await?;
    let total = orders.len() as i64;

    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(Meta::new(1, total, total)),
    ))
}
