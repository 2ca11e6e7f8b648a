//! Orchestrates dish retrieval and the publication toggle.

use std::sync::Arc;

use tracing::info;

use crate::{dish::Dish, error::AppError, notify::DishEvents, store::DishStore};

/// The one writer of dish state. Holds no cached copies, each request goes
/// back to the store.
pub struct DishService {
    store: Arc<dyn DishStore>,
    events: DishEvents,
    notify_enabled: bool,
}

impl DishService {
    pub fn new(store: Arc<dyn DishStore>, events: DishEvents, notify_enabled: bool) -> Self {
        Self {
            store,
            events,
            notify_enabled,
        }
    }

    pub async fn list_dishes(&self) -> Result<Vec<Dish>, AppError> {
        self.store.list_all().await
    }

    /// Flips `isPublished` for `dish_id`.
    ///
    /// The `dishUpdated` event goes out only after the store has confirmed
    /// the write, so subscribers never hear about a toggle that did not
    /// commit. A missing key publishes nothing.
    pub async fn toggle_dish(&self, dish_id: &str) -> Result<Dish, AppError> {
        let dish = self
            .store
            .apply_toggle(dish_id)
            .await?
            .ok_or(AppError::DishNotFound)?;

        info!(
            dish_id = %dish.dish_id,
            is_published = dish.is_published,
            "Dish toggled"
        );

        if self.notify_enabled {
            self.events.publish(dish.clone());
        }

        Ok(dish)
    }

    pub fn events(&self) -> &DishEvents {
        &self.events
    }
}
