use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use quoting_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        customers::CreateCustomerRequest,
        orders::{CreateOrderRequest, OrderItemInput},
        products::CreateProductRequest,
    },
    entity::{customers, products},
    services::{
        company_service::ensure_unassigned_company, customer_service, order_service,
        product_service,
    },
    state::AppState,
};

const DEMO_EMAIL: &str = "buyer@example.com";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let state = AppState { orm };

    let company = ensure_unassigned_company(&state.orm).await?;
    println!("Ensured company {} ({})", company.name, company.id);

    let product_ids = seed_products(&state).await?;
    let customer_id = ensure_customer(&state).await?;

    let existing_orders = order_service::get_orders_for_customer(&state, customer_id)
        .await?
        .data
        .map_or(0, |list| list.items.len());
    if existing_orders == 0 {
        let items = product_ids
            .iter()
            .zip([2, 1, 3])
            .map(|((id, price), quantity)| OrderItemInput {
                product_id: *id,
                quantity,
                price: *price,
            })
            .collect();
        let order = order_service::create_order(
            &state,
            CreateOrderRequest {
                customer_id,
                items,
            },
        )
        .await?;
        if let Some(order) = order.data {
            println!("Seeded order {} totalling {}", order.id, order.total_price);
        }
    }

    println!("Seed completed. Customer ID: {customer_id}");
    Ok(())
}

async fn seed_products(state: &AppState) -> anyhow::Result<Vec<(i32, Decimal)>> {
    let catalog = [
        ("Steel Bracket", "Zinc plated, 40mm", "BRK-040", Decimal::new(999, 2)),
        ("Hex Bolt M8", "Box of 100", "BLT-M8-100", Decimal::new(1450, 2)),
        ("Wall Anchor", "Nylon, pack of 25", "ANC-25", Decimal::new(375, 2)),
    ];

    let mut seeded = Vec::with_capacity(catalog.len());
    for (name, description, sku, base_price) in catalog {
        let existing = products::Entity::find()
            .filter(products::Column::Sku.eq(sku))
            .one(&state.orm)
            .await?;
        let id = match existing {
            Some(product) => product.id,
            None => {
                let created = product_service::create_product(
                    state,
                    CreateProductRequest {
                        name: name.to_string(),
                        description: Some(description.to_string()),
                        sku: sku.to_string(),
                        base_price,
                    },
                )
                .await?;
                created
                    .data
                    .map(|product| product.id)
                    .ok_or_else(|| anyhow::anyhow!("product {sku} was not returned"))?
            }
        };
        seeded.push((id, base_price));
    }

    println!("Seeded products");
    Ok(seeded)
}

async fn ensure_customer(state: &AppState) -> anyhow::Result<i32> {
    let existing = customers::Entity::find()
        .filter(customers::Column::Email.eq(DEMO_EMAIL))
        .one(&state.orm)
        .await?;
    if let Some(customer) = existing {
        return Ok(customer.id);
    }

    let created = customer_service::create_customer(
        state,
        CreateCustomerRequest {
            name: "Demo Buyer".to_string(),
            email: Some(DEMO_EMAIL.to_string()),
            phone: Some("5550100".to_string()),
            company_id: None,
        },
    )
    .await?;
    let id = created
        .data
        .map(|customer| customer.id)
        .ok_or_else(|| anyhow::anyhow!("customer was not returned"))?;

    println!("Ensured customer {DEMO_EMAIL}");
    Ok(id)
}
