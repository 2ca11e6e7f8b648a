//! Persistence adapter for the dish collection.
//!
//! The trait separates the HTTP stack from the concrete backend: production
//! runs on Redis ([`crate::database::RedisStore`]), tests run on
//! [`MemoryStore`]. Absence of a key is signalled as `Ok(None)` so callers
//! can tell "no such dish" apart from a transport failure.

use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;

use crate::{dish::Dish, error::AppError};

#[async_trait]
pub trait DishStore: Send + Sync {
    /// Every stored dish. Order is implementation-defined.
    async fn list_all(&self) -> Result<Vec<Dish>, AppError>;

    /// Exact-match lookup on the business key.
    async fn find_by_dish_id(&self, dish_id: &str) -> Result<Option<Dish>, AppError>;

    /// Flips `isPublished` for one key and returns the stored result.
    ///
    /// The read-flip-write sequence is atomic per key; concurrent toggles on
    /// the same key are last-write-wins.
    async fn apply_toggle(&self, dish_id: &str) -> Result<Option<Dish>, AppError>;

    /// Provisioning primitive. Enforces required fields and `dishId`
    /// uniqueness; not exposed over HTTP.
    async fn insert(&self, dish: Dish) -> Result<Dish, AppError>;
}

/// In-memory store, insertion-ordered.
///
/// `set_unavailable` flips every operation into `StorageUnavailable` so
/// tests can exercise the 500 path.
#[derive(Default, Clone)]
pub struct MemoryStore {
    dishes: Arc<RwLock<Vec<Dish>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::StorageUnavailable("storage offline".into()));
        }

        Ok(())
    }
}

#[async_trait]
impl DishStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Dish>, AppError> {
        self.check_available()?;

        let dishes = self
            .dishes
            .read()
            .map_err(|_| AppError::StorageUnavailable("lock poisoned".into()))?;

        Ok(dishes.clone())
    }

    async fn find_by_dish_id(&self, dish_id: &str) -> Result<Option<Dish>, AppError> {
        self.check_available()?;

        let dishes = self
            .dishes
            .read()
            .map_err(|_| AppError::StorageUnavailable("lock poisoned".into()))?;

        Ok(dishes.iter().find(|d| d.dish_id == dish_id).cloned())
    }

    async fn apply_toggle(&self, dish_id: &str) -> Result<Option<Dish>, AppError> {
        self.check_available()?;

        // Write lock held across the flip, no intermediate state observable.
        let mut dishes = self
            .dishes
            .write()
            .map_err(|_| AppError::StorageUnavailable("lock poisoned".into()))?;

        Ok(dishes.iter_mut().find(|d| d.dish_id == dish_id).map(|d| {
            d.is_published = !d.is_published;
            d.clone()
        }))
    }

    async fn insert(&self, dish: Dish) -> Result<Dish, AppError> {
        self.check_available()?;
        dish.validate()?;

        let mut dishes = self
            .dishes
            .write()
            .map_err(|_| AppError::StorageUnavailable("lock poisoned".into()))?;

        if dishes.iter().any(|d| d.dish_id == dish.dish_id) {
            return Err(AppError::DuplicateDish(dish.dish_id));
        }

        dishes.push(dish.clone());
        Ok(dish)
    }
}
