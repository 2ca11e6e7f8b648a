//! HTTP route handlers.
//!
//! - `GET  /api/dishes` — every dish as a JSON array
//! - `POST /api/dishes/toggle/{id}` — flip publication status by `dishId`;
//!   responds 200 with the updated dish (not the 204 empty-body variant)
//! - `GET  /api/dishes/events` — SSE stream of `dishUpdated` events, mounted
//!   only when real-time notifications are enabled

use std::{convert::Infallible, sync::Arc};

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, stream};
use tokio::sync::broadcast::error::RecvError;

use crate::{dish::Dish, error::AppError, state::AppState};

pub async fn list_dishes_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Dish>>, AppError> {
    let dishes = state.service.list_dishes().await?;

    Ok(Json(dishes))
}

pub async fn toggle_dish_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Dish>, AppError> {
    let dish = state.service.toggle_dish(&id).await?;

    Ok(Json(dish))
}

pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.service.events().subscribe();

    let stream = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(dish) => match Event::default().event("dishUpdated").json_data(&dish) {
                    Ok(event) => return Some((Ok(event), rx)),
                    Err(_) => continue,
                },
                // Lagged receivers skip missed events, no replay.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
