mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use quoting_api::{app::build_app, config::AppConfig};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> anyhow::Result<Router> {
    let state = common::setup_state().await?;
    let config = AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        concurrency_limit: 16,
        body_limit_bytes: 64 * 1024,
    };
    Ok(build_app(state, &config))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn order_lifecycle_over_http() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, customer) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "Ana", "email": "ana@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = customer["data"]["id"].as_i64().expect("customer id");

    let (status, product) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Widget", "sku": "W-1", "base_price": "12.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = product["data"]["id"].as_i64().expect("product id");

    let (status, order) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer_id,
            "items": [{ "product_id": product_id, "quantity": 3, "price": "9.99" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["success"], true);
    assert_eq!(order["data"]["total_price"], "29.97");
    let order_id = order["data"]["id"].as_i64().expect("order id");

    let (status, copy) = send(&app, "POST", &format!("/api/orders/{order_id}/duplicate"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(copy["data"]["id"].as_i64(), Some(order_id));
    assert_eq!(copy["data"]["total_price"], "29.97");

    let (status, total) = send(&app, "GET", &format!("/api/orders/{order_id}/total"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(total["data"]["total_price"], "29.97");
    assert_eq!(total["data"]["item_count"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, missing) = send(&app, "GET", &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["success"], false);
    assert_eq!(missing["data"]["kind"], "not_found");

    Ok(())
}

#[tokio::test]
async fn empty_order_is_unprocessable() -> anyhow::Result<()> {
    let app = app().await?;

    let (_, customer) = send(&app, "POST", "/api/customers", Some(json!({ "name": "Ana" }))).await;
    let customer_id = customer["data"]["id"].as_i64().expect("customer id");

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "customer_id": customer_id, "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["kind"], "validation");

    let (status, list) = send(&app, "GET", "/api/orders?page=1&per_page=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["meta"]["total"], 0);
    assert_eq!(list["meta"]["per_page"], 5);

    Ok(())
}

#[tokio::test]
async fn duplicate_sku_is_conflict() -> anyhow::Result<()> {
    let app = app().await?;
    let body = json!({ "name": "Widget", "sku": "W-1", "base_price": "1.00" });

    let (status, _) = send(&app, "POST", "/api/products", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let body = json!({ "name": "Widget 2", "sku": "W-1", "base_price": "1.00" });
    let (status, conflict) = send(&app, "POST", "/api/products", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["data"]["kind"], "conflict");

    let (status, found) = send(&app, "GET", "/api/products/sku/W-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["data"]["base_price"], "1.00");

    Ok(())
}

#[tokio::test]
async fn unknown_route_uses_the_envelope() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, "GET", "/api/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["path"], "/api/nowhere");

    let (status, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["data"]["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn oversized_prices_are_unprocessable() -> anyhow::Result<()> {
    let app = app().await?;

    let (_, customer) = send(&app, "POST", "/api/customers", Some(json!({ "name": "Ana" }))).await;
    let customer_id = customer["data"]["id"].as_i64().expect("customer id");
    let (_, product) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Widget", "sku": "W-1", "base_price": "1.00" })),
    )
    .await;
    let product_id = product["data"]["id"].as_i64().expect("product id");

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer_id,
            "items": [{
                "product_id": product_id,
                "quantity": 1,
                "price": "79228162514264337593543950335"
            }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["kind"], "validation");

    let (status, body) = send(
        &app,
        "GET",
        "/api/products?min_price=79228162514264337593543950335",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["kind"], "validation");

    let (status, body) = send(&app, "GET", "/api/orders?page=9223372036854775807", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);

    Ok(())
}
