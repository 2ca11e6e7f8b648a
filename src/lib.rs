//! Dish registry service.
//!
//! Serves a small collection of dish records over HTTP: list them, toggle a
//! publication flag, and (when enabled) push every committed toggle to
//! connected real-time subscribers as a `dishUpdated` event.
//!
//! # API
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/api/dishes` | 200, JSON array of dishes |
//! | POST | `/api/dishes/toggle/{id}` | 200 updated dish, 404 unknown id |
//! | GET | `/api/dishes/events` | SSE `dishUpdated` stream |
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//! Run against a local Redis.
//! ```sh
//! REDIS_URL=redis://127.0.0.1:6379 DISH_PORT=3000 cargo run
//! ```

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod dish;
pub mod error;
pub mod notify;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

use routes::{events_handler, list_dishes_handler, toggle_dish_handler};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let mut app = Router::new()
        .route("/api/dishes", get(list_dishes_handler))
        .route("/api/dishes/toggle/{id}", post(toggle_dish_handler));

    if state.config.realtime {
        app = app.route("/api/dishes/events", get(events_handler));
    }

    app.layer(cors).with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await.expect("Storage misconfigured!");

    info!("Starting server...");
    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
