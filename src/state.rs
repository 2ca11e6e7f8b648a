use std::sync::Arc;

use crate::{
    config::Config,
    database::{RedisStore, init_redis},
    error::AppError,
    notify::DishEvents,
    service::DishService,
    store::DishStore,
};

pub struct AppState {
    pub config: Config,
    pub service: DishService,
}

impl AppState {
    pub async fn new() -> Result<Arc<Self>, AppError> {
        let config = Config::load();

        let connection = init_redis(&config.redis_url).await?;
        let store = Arc::new(RedisStore::new(connection));

        Ok(Self::with_store(config, store))
    }

    /// State over any store backend; tests run this with a memory store.
    pub fn with_store(config: Config, store: Arc<dyn DishStore>) -> Arc<Self> {
        let service = DishService::new(store, DishEvents::new(), config.realtime);

        Arc::new(Self { config, service })
    }
}
