mod common;

use common::{create_customer, create_order, create_product, dec, line, setup_state};
use quoting_api::{
    dto::{
        companies::{CreateCompanyRequest, UpdateCompanyRequest},
        customer_pricing::{
            CreateCustomerPriceRequest, CreateCustomerTierRequest, UpdateCustomerPriceRequest,
        },
        customers::{CreateCustomerRequest, UpdateCustomerRequest},
        products::CreateProductRequest,
    },
    entity::order_items,
    error::AppError,
    routes::params::{CustomerPriceQuery, ProductQuery, ProductSortBy, SortOrder},
    services::{
        company_service::{self, UNASSIGNED_COMPANY_NAME},
        customer_pricing_service, customer_service, order_service, product_service,
    },
};
use sea_orm::{EntityTrait, PaginatorTrait};

fn company_request(name: &str) -> CreateCompanyRequest {
    CreateCompanyRequest {
        name: name.into(),
        business_line: "Hardware".into(),
        state: "Jalisco".into(),
    }
}

#[tokio::test]
async fn customers_without_company_join_the_unassigned_company() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let first = create_customer(&state, "Ana", None).await;
    let second = create_customer(&state, "Ben", None).await;
    assert_eq!(first.company_id, second.company_id);

    let detail = company_service::get_company(&state, &first.company_id)
        .await?
        .data
        .expect("company");
    assert_eq!(detail.company.name, UNASSIGNED_COMPANY_NAME);
    assert_eq!(detail.customer_count, 2);

    let again = company_service::ensure_unassigned_company(&state.orm).await?;
    assert_eq!(again.id, first.company_id);

    let err = company_service::delete_company(&state, &first.company_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    Ok(())
}

#[tokio::test]
async fn unassigned_company_cannot_be_renamed_or_impersonated() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let sentinel = company_service::ensure_unassigned_company(&state.orm).await?;

    let err = company_service::update_company(
        &state,
        &sentinel.id,
        UpdateCompanyRequest {
            name: Some("Whatever".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = company_service::delete_company(&state, &sentinel.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let edited = company_service::update_company(
        &state,
        &sentinel.id,
        UpdateCompanyRequest {
            state: Some("Nuevo Leon".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("company");
    assert_eq!(edited.name, UNASSIGNED_COMPANY_NAME);

    let err = company_service::create_company(&state, company_request("unassigned"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let acme = company_service::create_company(&state, company_request("Acme"))
        .await?
        .data
        .expect("company");
    let err = company_service::update_company(
        &state,
        &acme.id,
        UpdateCompanyRequest {
            name: Some(UNASSIGNED_COMPANY_NAME.into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let again = company_service::ensure_unassigned_company(&state.orm).await?;
    assert_eq!(again.id, sentinel.id);

    Ok(())
}

#[tokio::test]
async fn company_names_are_unique() -> anyhow::Result<()> {
    let state = setup_state().await?;

    company_service::create_company(&state, company_request("Acme")).await?;
    let err = company_service::create_company(&state, company_request("Acme"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = company_service::create_company(&state, company_request("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    Ok(())
}

#[tokio::test]
async fn deleting_a_company_removes_its_customers_and_orders() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let company = company_service::create_company(&state, company_request("Acme"))
        .await?
        .data
        .expect("company");
    let customer = customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            name: "Ana".into(),
            email: None,
            phone: None,
            company_id: Some(company.id.clone()),
        },
    )
    .await?
    .data
    .expect("customer");
    let product = create_product(&state, "A", "1.00").await;
    let order = create_order(&state, customer.id, vec![line(product.id, 1, "1.00")]).await;

    let listed = company_service::list_company_customers(&state, &company.id)
        .await?
        .data
        .expect("customers")
        .items;
    assert_eq!(listed.len(), 1);

    company_service::delete_company(&state, &company.id).await?;

    let err = customer_service::get_customer(&state, customer.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    let err = order_service::get_order(&state, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(order_items::Entity::find().count(&state.orm).await?, 0);

    Ok(())
}

#[tokio::test]
async fn customer_for_unknown_company_is_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let err = customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            name: "Ana".into(),
            email: None,
            phone: None,
            company_id: Some("no-such-company".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Company", .. }));

    Ok(())
}

#[tokio::test]
async fn customer_emails_are_unique_and_normalized() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let ana = create_customer(&state, "Ana", Some(" ana@Example.com ")).await;
    assert_eq!(ana.email.as_deref(), Some("ana@example.com"));

    let err = customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            name: "Other Ana".into(),
            email: Some("ana@example.com".into()),
            phone: None,
            company_id: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let ben = create_customer(&state, "Ben", Some("ben@example.com")).await;
    let err = customer_service::update_customer(
        &state,
        ben.id,
        UpdateCustomerRequest {
            email: Some("ana@example.com".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    Ok(())
}

#[tokio::test]
async fn duplicate_customer_drops_email_and_keeps_company() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let ana = create_customer(&state, "Ana", Some("ana@example.com")).await;

    let copy = customer_service::duplicate_customer(&state, ana.id)
        .await?
        .data
        .expect("copy");
    assert_ne!(copy.id, ana.id);
    assert_eq!(copy.name, "Copy of Ana");
    assert_eq!(copy.email, None);
    assert_eq!(copy.company_id, ana.company_id);

    Ok(())
}

#[tokio::test]
async fn deleting_a_customer_cascades_to_orders() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let ana = create_customer(&state, "Ana", None).await;
    let product = create_product(&state, "A", "1.00").await;
    let order = create_order(&state, ana.id, vec![line(product.id, 2, "1.00")]).await;

    customer_service::delete_customer(&state, ana.id).await?;

    let err = order_service::get_order(&state, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    let err = customer_service::delete_customer(&state, ana.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn product_sku_is_unique_and_searchable() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let bracket = create_product(&state, "BRK-1", "9.99").await;
    create_product(&state, "BLT-2", "14.50").await;
    create_product(&state, "ANC-3", "3.75").await;

    let err = product_service::create_product(
        &state,
        CreateProductRequest {
            name: "Another bracket".into(),
            description: None,
            sku: "BRK-1".into(),
            base_price: dec("1.00"),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let found = product_service::get_product_by_sku(&state, "BRK-1")
        .await?
        .data
        .expect("product");
    assert_eq!(found.id, bracket.id);
    assert_eq!(found.base_price, dec("9.99"));

    let err = product_service::get_product_by_sku(&state, "NOPE")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let cheap_first = product_service::list_products(
        &state,
        ProductQuery {
            max_price: Some(dec("10.00")),
            sort_by: Some(ProductSortBy::Price),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    let skus: Vec<_> = cheap_first.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, ["ANC-3", "BRK-1"]);

    Ok(())
}

#[tokio::test]
async fn product_prices_must_be_non_negative_with_two_decimals() -> anyhow::Result<()> {
    let state = setup_state().await?;

    for price in ["-0.01", "1.999"] {
        let err = product_service::create_product(
            &state,
            CreateProductRequest {
                name: format!("Bad {price}"),
                description: None,
                sku: format!("BAD{price}"),
                base_price: dec(price),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{price}");
    }

    Ok(())
}

#[tokio::test]
async fn duplicate_product_derives_name_and_sku() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let original = create_product(&state, "BRK-1", "9.99").await;

    let copy = product_service::duplicate_product(&state, original.id)
        .await?
        .data
        .expect("copy");
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, format!("Copy of {}", original.name));
    assert_eq!(copy.sku, "BRK-1-copy");
    assert_eq!(copy.base_price, original.base_price);

    let err = product_service::duplicate_product(&state, original.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    Ok(())
}

#[tokio::test]
async fn deleting_a_product_removes_its_order_lines() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let ana = create_customer(&state, "Ana", None).await;
    let a = create_product(&state, "A", "1.00").await;
    let b = create_product(&state, "B", "2.00").await;
    let order = create_order(
        &state,
        ana.id,
        vec![line(a.id, 1, "1.00"), line(b.id, 1, "2.00")],
    )
    .await;

    product_service::delete_product(&state, a.id).await?;

    let reloaded = order_service::get_order(&state, order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(reloaded.items.len(), 1);
    assert_eq!(reloaded.total_price, dec("2.00"));

    Ok(())
}

#[tokio::test]
async fn customer_prices_are_unique_per_pair_and_ignored_by_orders() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let ana = create_customer(&state, "Ana", None).await;
    let product = create_product(&state, "A", "10.00").await;

    let price = customer_pricing_service::create_customer_price(
        &state,
        CreateCustomerPriceRequest {
            customer_id: ana.id,
            product_id: product.id,
            custom_price: dec("8.50"),
        },
    )
    .await?
    .data
    .expect("price");
    assert_eq!(price.custom_price, dec("8.50"));

    let err = customer_pricing_service::create_customer_price(
        &state,
        CreateCustomerPriceRequest {
            customer_id: ana.id,
            product_id: product.id,
            custom_price: dec("7.00"),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let updated = customer_pricing_service::update_customer_price(
        &state,
        price.id,
        UpdateCustomerPriceRequest {
            custom_price: dec("8.25"),
        },
    )
    .await?
    .data
    .expect("updated");
    assert_eq!(updated.custom_price, dec("8.25"));

    let order = create_order(&state, ana.id, vec![line(product.id, 2, "10.00")]).await;
    assert_eq!(order.total_price, dec("20.00"));

    let listed = customer_pricing_service::list_customer_prices(
        &state,
        CustomerPriceQuery {
            customer_id: Some(ana.id),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("prices")
    .items;
    assert_eq!(listed.len(), 1);

    customer_pricing_service::delete_customer_price(&state, price.id).await?;
    let err = customer_pricing_service::get_customer_price(&state, price.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn customer_tiers_round_trip() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let tier = customer_pricing_service::create_customer_tier(
        &state,
        CreateCustomerTierRequest {
            name: "Gold".into(),
            discount_percentage: dec("12.50"),
        },
    )
    .await?
    .data
    .expect("tier");
    assert_eq!(tier.discount_percentage, dec("12.50"));

    let err = customer_pricing_service::create_customer_tier(
        &state,
        CreateCustomerTierRequest {
            name: "Gold".into(),
            discount_percentage: dec("5.00"),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    customer_pricing_service::delete_customer_tier(&state, tier.id).await?;
    let err = customer_pricing_service::get_customer_tier(&state, tier.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    Ok(())
}
