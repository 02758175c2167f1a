//! Runs `HttpStorefrontApi` and `CartService` against an in-process axum
//! backend that speaks the storefront REST contract.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use woodnest_client::{
    CartService, CartStore, ClientConfig, ClientError, HttpStorefrontApi, OrderService,
    StorefrontApi,
};
use woodnest_core::{MeasurementField, SizeSelection};

const SESSION: &str = "guest-session-1";

#[derive(Default)]
struct Backend {
    lines: Mutex<Vec<Value>>,
    add_bodies: Mutex<Vec<Value>>,
    sessions: Mutex<Vec<String>>,
    /// Replaces the `cart/add` reply when set.
    add_reply: Mutex<Option<Value>>,
}

type Shared = Arc<Backend>;

fn record_session(backend: &Backend, headers: &HeaderMap) {
    let session = headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    backend.sessions.lock().unwrap().push(session);
}

fn cart_json(backend: &Backend) -> Value {
    json!({ "items": backend.lines.lock().unwrap().clone() })
}

fn rug_json() -> Value {
    json!({
        "id": "rug-1",
        "name": "Jute Rug",
        "price": 500,
        "sizeVariants": [
            { "id": "5x3", "name": "5ft x 3ft", "price": 650, "inStock": true,
              "dimensions": { "length": 5, "width": 3, "unit": "ft" } }
        ],
        "customSizeConfig": {
            "enabled": true,
            "fields": ["length", "width"],
            "unit": "ft",
            "pricePerUnit": 50,
            "minimumCharge": 500
        }
    })
}

async fn get_product(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    record_session(&backend, &headers);
    if id == "rug-1" {
        (StatusCode::OK, Json(json!({ "success": true, "data": rug_json() })))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Product not found" })),
        )
    }
}

async fn suggestions(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    Json(json!([{ "id": "rug-1", "name": format!("Jute Rug ({})", q) }]))
}

async fn get_cart(State(backend): State<Shared>, headers: HeaderMap) -> Json<Value> {
    record_session(&backend, &headers);
    Json(cart_json(&backend))
}

async fn add_to_cart(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record_session(&backend, &headers);
    backend.add_bodies.lock().unwrap().push(body.clone());

    let unit_price = body["customSize"]["calculatedPrice"]
        .as_f64()
        .or_else(|| body["sizeVariant"]["price"].as_f64())
        .unwrap_or(500.0);
    {
        let mut lines = backend.lines.lock().unwrap();
        let mut line = json!({
            "id": format!("line-{}", lines.len() + 1),
            "productId": body["productId"],
            "name": "Jute Rug",
            "quantity": body["quantity"],
            "unitPrice": unit_price,
        });
        if let Some(custom) = body.get("customSize") {
            line["customSize"] = custom.clone();
        }
        lines.push(line);
    }

    if let Some(reply) = backend.add_reply.lock().unwrap().clone() {
        return Json(reply);
    }
    Json(json!({ "success": true, "data": cart_json(&backend) }))
}

async fn update_line(
    State(backend): State<Shared>,
    Path(line_id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let updated = {
        let mut lines = backend.lines.lock().unwrap();
        match lines.iter_mut().find(|l| l["id"] == line_id.as_str()) {
            Some(line) => {
                line["quantity"] = body["quantity"].clone();
                true
            }
            None => false,
        }
    };

    if updated {
        (StatusCode::OK, Json(cart_json(&backend)))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Cart item not found" })),
        )
    }
}

async fn remove_line(State(backend): State<Shared>, Path(line_id): Path<String>) -> Json<Value> {
    backend
        .lines
        .lock()
        .unwrap()
        .retain(|l| l["id"] != line_id.as_str());
    Json(cart_json(&backend))
}

async fn clear_cart(State(backend): State<Shared>) -> Json<Value> {
    backend.lines.lock().unwrap().clear();
    Json(json!({ "success": true, "message": "Cart cleared" }))
}

async fn orders(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer customer-token");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Please log in to view orders" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "data": [
            { "id": "o-1", "status": "delivered", "createdAt": "2026-01-02T10:00:00Z",
              "items": [], "total": 650 },
            { "id": "o-2", "status": "pending", "createdAt": "2026-03-04T10:00:00Z",
              "items": [], "total": 600 }
        ] })),
    )
}

async fn spawn_backend() -> (String, Shared) {
    let backend: Shared = Arc::new(Backend::default());
    let app = Router::new()
        .route("/api/products/{id}", get(get_product))
        .route("/api/products/search/suggestions", get(suggestions))
        .route("/api/cart", get(get_cart).delete(clear_cart))
        .route("/api/cart/add", post(add_to_cart))
        .route("/api/cart/items/{line_id}", put(update_line).delete(remove_line))
        .route("/api/orders", get(orders))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api", addr), backend)
}

fn config(base_url: &str, token: Option<&str>) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.auth_token = token.map(str::to_string);
    config.session.id = SESSION.to_string();
    config
}

#[tokio::test]
async fn test_custom_size_add_to_cart_round_trip() {
    let (base_url, backend) = spawn_backend().await;
    let api = Arc::new(HttpStorefrontApi::new(&config(&base_url, None)).unwrap());

    let product = api.fetch_product("rug-1").await.unwrap();
    assert!(product.is_customizable());

    let mut selection = SizeSelection::new(&product);
    selection.switch_to_custom().unwrap();
    selection.set_measurement_input(MeasurementField::Length, "4");
    selection.set_measurement_input(MeasurementField::Width, "3");
    selection.set_notes(Some("  bound edges ".to_string()));

    let service = CartService::new(api.clone(), Arc::new(CartStore::default()));
    let cart = service.add_to_cart(&selection, 1).await.unwrap();

    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.subtotal().cents(), 60_000);
    assert_eq!(service.store().state().cart, cart);

    let bodies = backend.add_bodies.lock().unwrap().clone();
    assert_eq!(
        bodies,
        vec![json!({
            "productId": "rug-1",
            "quantity": 1,
            "customSize": {
                "isCustom": true,
                "measurements": { "length": 4.0, "width": 3.0 },
                "calculatedPrice": 600.0,
                "notes": "bound edges"
            }
        })]
    );
    assert!(backend.sessions.lock().unwrap().iter().all(|s| s == SESSION));
}

#[tokio::test]
async fn test_missing_width_never_reaches_backend() {
    let (base_url, backend) = spawn_backend().await;
    let api = Arc::new(HttpStorefrontApi::new(&config(&base_url, None)).unwrap());
    let product = api.fetch_product("rug-1").await.unwrap();

    let mut selection = SizeSelection::new(&product);
    selection.switch_to_custom().unwrap();
    selection.set_measurement_input(MeasurementField::Length, "4");

    let service = CartService::new(api, Arc::new(CartStore::default()));
    let err = service.add_to_cart(&selection, 1).await.unwrap_err();

    assert_eq!(err.to_string(), "missing measurements");
    assert!(backend.add_bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_line_lifecycle() {
    let (base_url, _backend) = spawn_backend().await;
    let api = Arc::new(HttpStorefrontApi::new(&config(&base_url, None)).unwrap());
    let product = api.fetch_product("rug-1").await.unwrap();

    let mut selection = SizeSelection::new(&product);
    selection.select_variant("5x3").unwrap();

    let service = CartService::new(api.clone(), Arc::new(CartStore::default()));
    service.add_to_cart(&selection, 1).await.unwrap();

    let cart = service.update_quantity("line-1", 4).await.unwrap();
    assert_eq!(cart.total_quantity(), 4);
    assert_eq!(cart.subtotal().cents(), 260_000);

    let err = service.update_quantity("missing", 2).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Remote { status: 404, ref message } if message == "Cart item not found"
    ));
    assert_eq!(
        service.store().state().error.as_deref(),
        Some("Backend error (404): Cart item not found")
    );
    assert_eq!(service.store().state().cart.total_quantity(), 4);

    let cart = service.remove_line("line-1").await.unwrap();
    assert!(cart.is_empty());

    service.add_to_cart(&selection, 2).await.unwrap();
    service.clear().await.unwrap();
    assert!(service.store().state().cart.is_empty());
    assert!(api.fetch_cart().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unexpected_add_reply_keeps_previous_cart() {
    let (base_url, backend) = spawn_backend().await;
    let api = Arc::new(HttpStorefrontApi::new(&config(&base_url, None)).unwrap());
    let product = api.fetch_product("rug-1").await.unwrap();

    let mut selection = SizeSelection::new(&product);
    selection.select_variant("5x3").unwrap();

    let service = CartService::new(api, Arc::new(CartStore::default()));
    let before = service.add_to_cart(&selection, 1).await.unwrap();
    assert_eq!(before.item_count(), 1);

    let replies = [
        json!({ "success": true, "message": "Added" }),
        json!({ "success": true, "data": { "items": [
            { "id": "line-9", "productId": "rug-1", "quantity": "two", "unitPrice": 10 }
        ] } }),
    ];
    for reply in replies {
        *backend.add_reply.lock().unwrap() = Some(reply.clone());

        let err = service.add_to_cart(&selection, 1).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)), "{} gave {:?}", reply, err);
        assert!(!service.is_submitting());

        let state = service.store().state();
        assert_eq!(state.cart, before);
        assert!(state.error.is_some());
    }
}

#[tokio::test]
async fn test_remote_errors_carry_backend_message() {
    let (base_url, _backend) = spawn_backend().await;
    let api = HttpStorefrontApi::new(&config(&base_url, None)).unwrap();

    let err = api.fetch_product("nope").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Remote { status: 404, ref message } if message == "Product not found"
    ));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_orders_need_bearer_token() {
    let (base_url, _backend) = spawn_backend().await;

    let guest = Arc::new(HttpStorefrontApi::new(&config(&base_url, None)).unwrap());
    let err = OrderService::new(guest).history().await.unwrap_err();
    assert!(matches!(err, ClientError::Remote { status: 401, .. }));

    let customer =
        Arc::new(HttpStorefrontApi::new(&config(&base_url, Some("customer-token"))).unwrap());
    let orders = OrderService::new(customer).history().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, "o-2");
}

#[tokio::test]
async fn test_suggestions_send_query() {
    let (base_url, _backend) = spawn_backend().await;
    let api = HttpStorefrontApi::new(&config(&base_url, None)).unwrap();

    let hits = api.search_suggestions("jute rug").await.unwrap();
    assert_eq!(hits[0].name, "Jute Rug (jute rug)");
}

#[tokio::test]
async fn test_unreachable_backend_is_retryable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpStorefrontApi::new(&config(&format!("http://{}/api", addr), None)).unwrap();
    let err = api.fetch_cart().await.unwrap_err();
    assert!(err.is_retryable(), "unexpected error: {:?}", err);
}
