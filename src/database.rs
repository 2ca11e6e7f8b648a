//! # Redis
//!
//! Durable dish collection.
//!
//! ## Layout
//!
//! - One hash at [`DISH_HASH`], field per `dishId`, value is the dish JSON
//!   document
//! - `HSETNX` on insert enforces the unique business key
//! - Toggle runs as a Lua script so the read-flip-write is atomic per key;
//!   concurrent toggles on the same key are last-write-wins
//!
//! ## Commands
//!
//! Inspect the collection.
//! ```sh
//! redis-cli HGETALL dishes
//! ```

use std::time::Duration;

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client, Script,
    aio::{ConnectionManager, ConnectionManagerConfig},
};

use crate::{dish::Dish, error::AppError, store::DishStore};

pub const DISH_HASH: &str = "dishes";

const TOGGLE_SCRIPT: &str = r"
local doc = redis.call('HGET', KEYS[1], ARGV[1])
if not doc then
    return false
end
local dish = cjson.decode(doc)
dish.isPublished = not dish.isPublished
doc = cjson.encode(dish)
redis.call('HSET', KEYS[1], ARGV[1], doc)
return doc
";

pub async fn init_redis(redis_url: &str) -> Result<ConnectionManager, AppError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url)?;
    let connection_manager = client
        .get_connection_manager_with_config(config)
        .await?;

    Ok(connection_manager)
}

pub struct RedisStore {
    connection: ConnectionManager,
    toggle_script: Script,
}

impl RedisStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self {
            connection,
            toggle_script: Script::new(TOGGLE_SCRIPT),
        }
    }

    // ConnectionManager is a cheap handle, clone per operation.
    fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }
}

#[async_trait]
impl DishStore for RedisStore {
    async fn list_all(&self) -> Result<Vec<Dish>, AppError> {
        let mut connection = self.connection();
        let docs: Vec<String> = connection.hvals(DISH_HASH).await?;

        docs.iter()
            .map(|doc| serde_json::from_str(doc).map_err(AppError::from))
            .collect()
    }

    async fn find_by_dish_id(&self, dish_id: &str) -> Result<Option<Dish>, AppError> {
        let mut connection = self.connection();
        let doc: Option<String> = connection.hget(DISH_HASH, dish_id).await?;

        doc.map(|doc| serde_json::from_str(&doc).map_err(AppError::from))
            .transpose()
    }

    async fn apply_toggle(&self, dish_id: &str) -> Result<Option<Dish>, AppError> {
        let mut connection = self.connection();
        let doc: Option<String> = self
            .toggle_script
            .key(DISH_HASH)
            .arg(dish_id)
            .invoke_async(&mut connection)
            .await?;

        doc.map(|doc| serde_json::from_str(&doc).map_err(AppError::from))
            .transpose()
    }

    async fn insert(&self, dish: Dish) -> Result<Dish, AppError> {
        dish.validate()?;

        let mut connection = self.connection();
        let doc = serde_json::to_string(&dish)?;
        let added: bool = connection.hset_nx(DISH_HASH, &dish.dish_id, doc).await?;

        if !added {
            return Err(AppError::DuplicateDish(dish.dish_id));
        }

        Ok(dish)
    }
}
