//! API integration tests.
//!
//! Drives the complete request flow (HTTP router, service, store) against a
//! memory store, no Redis required.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use dish_registry::{
    config::Config,
    dish::Dish,
    router,
    state::AppState,
    store::{DishStore, MemoryStore},
};

fn test_config(realtime: bool) -> Config {
    Config {
        port: 0,
        redis_url: String::new(),
        realtime,
    }
}

async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .insert(Dish::new("Pasta", "12345", "http://x/p.jpg"))
        .await
        .unwrap();
    store
        .insert(Dish::new("Pizza", "67890", "http://x/z.jpg"))
        .await
        .unwrap();
    store
}

fn test_router(store: MemoryStore, realtime: bool) -> Router {
    router(AppState::with_store(test_config(realtime), Arc::new(store)))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

#[tokio::test]
async fn list_returns_every_stored_dish() {
    let app = test_router(seeded_store().await, true);

    let (status, body) = send(&app, Method::GET, "/api/dishes").await;

    assert_eq!(status, StatusCode::OK);
    let dishes = body.as_array().unwrap();
    assert_eq!(dishes.len(), 2);
    assert_eq!(dishes[0]["dishName"], "Pasta");
    assert_eq!(dishes[0]["isPublished"], false);
}

#[tokio::test]
async fn toggle_responds_with_the_updated_dish_and_list_reflects_it() {
    let app = test_router(seeded_store().await, true);

    let (status, body) = send(&app, Method::POST, "/api/dishes/toggle/12345").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dishId"], "12345");
    assert_eq!(body["dishName"], "Pasta");
    assert_eq!(body["imageUrl"], "http://x/p.jpg");
    assert_eq!(body["isPublished"], true);

    let (_, body) = send(&app, Method::GET, "/api/dishes").await;
    let pasta = body
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["dishId"] == "12345")
        .unwrap()
        .clone();
    assert_eq!(pasta["isPublished"], true);

    // Untouched records stay untouched.
    let pizza = body
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["dishId"] == "67890")
        .unwrap()
        .clone();
    assert_eq!(pizza["isPublished"], false);
}

#[tokio::test]
async fn double_toggle_round_trips_over_http() {
    let app = test_router(seeded_store().await, true);

    let (_, body) = send(&app, Method::POST, "/api/dishes/toggle/12345").await;
    assert_eq!(body["isPublished"], true);

    let (_, body) = send(&app, Method::POST, "/api/dishes/toggle/12345").await;
    assert_eq!(body["isPublished"], false);
}

#[tokio::test]
async fn toggle_on_unknown_id_is_404_and_store_is_unchanged() {
    let store = MemoryStore::new();
    let app = test_router(store.clone(), true);

    let (status, body) = send(&app, Method::POST, "/api/dishes/toggle/99999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Dish not found");
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn storage_failure_surfaces_as_500_with_a_message() {
    let store = seeded_store().await;
    let app = test_router(store.clone(), true);
    store.set_unavailable(true);

    let (status, body) = send(&app, Method::GET, "/api/dishes").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("Storage unavailable"));

    let (status, _) = send(&app, Method::POST, "/api/dishes/toggle/12345").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn events_route_streams_when_realtime_is_enabled() {
    let app = test_router(seeded_store().await, true);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/dishes/events")
        .body(Body::empty())
        .unwrap();

    // Only inspect status and headers, the body is an open stream.
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/event-stream"
    );
}

#[tokio::test]
async fn events_route_is_absent_when_realtime_is_disabled() {
    let app = test_router(seeded_store().await, false);

    let (status, _) = send(&app, Method::GET, "/api/dishes/events").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The toggle itself is unaffected by the disabled channel.
    let (status, body) = send(&app, Method::POST, "/api/dishes/toggle/12345").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isPublished"], true);
}
