use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use bazaar_api::{app, AppState};
use bazaar_checkout::{CheckoutEngine, CheckoutPolicy, RetryPolicy};
use bazaar_store::memory::{MemoryCatalog, MemoryOrderStore, RecordingNotifier};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_state() -> (AppState, Arc<MemoryCatalog>, Arc<MemoryOrderStore>) {
    let catalog = Arc::new(MemoryCatalog::new());
    let store = Arc::new(MemoryOrderStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let engine = Arc::new(CheckoutEngine::new(
        catalog.clone(),
        store.clone(),
        notifier,
        CheckoutPolicy {
            lookup_timeout: Duration::from_millis(500),
            write_timeout: Duration::from_millis(500),
            writer_concurrency: 4,
            notify_retry: RetryPolicy {
                max_attempts: 3,
                backoff: Duration::from_millis(1),
            },
        },
    ));

    let state = AppState {
        engine,
        store: store.clone(),
    };
    (state, catalog, store)
}

fn cart_body() -> Value {
    json!({
        "user_id": "user-1",
        "submission_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "items": [
            { "product_id": "p1", "name": "Masala Dosa", "unit_price": 10_000, "quantity": 2 },
            { "product_id": "p2", "name": "Filter Coffee", "unit_price": 5_000, "quantity": 1 }
        ],
        "delivery_fee": 4_000,
        "payment_method": "cod",
        "address": {
            "name": "Asha",
            "phone": "9800000000",
            "pincode": "560001",
            "city": "Bengaluru",
            "address_text": "12 MG Road"
        }
    })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_checkout_fans_out_and_orders_are_retrievable() {
    let (state, catalog, _store) = test_state();
    catalog.assign("p1", "vendor-a");
    catalog.assign("p2", "vendor-b");
    let router = app(state);

    let response = router
        .clone()
        .oneshot(post_json("/v1/checkout", cart_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["order_count"], 2);
    assert_eq!(
        body["message"],
        "Your 2 orders have been placed with different vendors"
    );
    assert_eq!(body["all_order_ids"].as_array().unwrap().len(), 2);

    let primary_id = body["primary_order_id"].as_str().unwrap();
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/v1/orders/{}", primary_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let order = read_json(response).await;
    assert_eq!(order["vendor_id"], "vendor-a");
    assert_eq!(order["subtotal"], 20_000);
    assert_eq!(order["delivery_fee_share"], 2_000);
    assert_eq!(order["total_amount"], 22_000);
    assert_eq!(order["order_status"], "pending");

    let response = router
        .oneshot(
            Request::builder()
                .uri("/v1/orders?user_id=user-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let orders = read_json(response).await;
    assert_eq!(orders.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unresolvable_cart_is_rejected() {
    let (state, _catalog, store) = test_state();
    let router = app(state);

    let response = router
        .oneshot(post_json("/v1/checkout", cart_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("vendor"));
    assert_eq!(store.order_count(), 0);
}

#[tokio::test]
async fn test_negative_delivery_fee_is_rejected() {
    let (state, catalog, store) = test_state();
    catalog.assign("p1", "vendor-a");
    catalog.assign("p2", "vendor-b");
    let router = app(state);

    let mut body = cart_body();
    body["delivery_fee"] = json!(-2_500);
    let response = router
        .oneshot(post_json("/v1/checkout", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("delivery fee"));
    assert_eq!(store.order_count(), 0);
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let (state, _catalog, _store) = test_state();
    let router = app(state);

    let mut body = cart_body();
    body["items"] = json!([]);
    let response = router
        .oneshot(post_json("/v1/checkout", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_all_writes_failing_maps_to_bad_gateway() {
    let (state, catalog, store) = test_state();
    catalog.assign("p1", "vendor-a");
    catalog.assign("p2", "vendor-b");
    store.fail_vendor("vendor-a");
    store.fail_vendor("vendor-b");
    let router = app(state);

    let response = router
        .oneshot(post_json("/v1/checkout", cart_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_status_transitions_through_the_endpoint() {
    let (state, catalog, _store) = test_state();
    catalog.assign("p1", "vendor-a");
    catalog.assign("p2", "vendor-a");
    let router = app(state);

    let response = router
        .clone()
        .oneshot(post_json("/v1/checkout", cart_body()))
        .await
        .unwrap();
    let body = read_json(response).await;
    let id = body["primary_order_id"].as_str().unwrap().to_string();

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/v1/orders/{}/status", id),
            json!({ "status": "confirmed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let order = read_json(response).await;
    assert_eq!(order["order_status"], "confirmed");

    // Skipping straight to delivered is not a legal move
    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/v1/orders/{}/status", id),
            json!({ "status": "delivered" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let (state, _catalog, _store) = test_state();
    let router = app(state);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/v1/orders/7c9e6679-7425-40de-944b-e07fc1f90ae7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
