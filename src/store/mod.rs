//! Storage collaborators consumed by the order engine.
//!
//! The engine only depends on the three traits below. [`InMemoryStore`] backs tests and the
//! demo; [`JsonFileStore`] keeps the café's collections as JSON files in a data directory.

mod in_memory;
mod json_file;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

use crate::config::Config;
use crate::domain::{IngredientStock, Order, Recipe};
use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read access to the menu.
#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn all_recipes(&self) -> StoreResult<Vec<Recipe>>;

    async fn recipe(&self, product_id: &str) -> StoreResult<Option<Recipe>> {
        Ok(self
            .all_recipes()
            .await?
            .into_iter()
            .find(|r| r.product_id == product_id))
    }
}

/// Ingredient stock. `save_stock` overwrites the whole collection.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn all_stock(&self) -> StoreResult<Vec<IngredientStock>>;
    async fn save_stock(&self, stock: Vec<IngredientStock>) -> StoreResult<()>;
}

/// Order records keyed by order id.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn all_orders(&self) -> StoreResult<Vec<Order>>;
    async fn order(&self, id: &str) -> StoreResult<Option<Order>>;
    /// Fails with [`StoreError::DuplicateId`] if the id is taken.
    async fn create_order(&self, order: Order) -> StoreResult<()>;
    /// Fails with [`StoreError::NotFound`] if no record has `id`.
    async fn rewrite_order(&self, id: &str, order: Order) -> StoreResult<()>;
    /// Fails with [`StoreError::NotFound`] if no record has `id`.
    async fn delete_order(&self, id: &str) -> StoreResult<()>;

    async fn open_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self
            .all_orders()
            .await?
            .into_iter()
            .filter(Order::is_open)
            .collect())
    }
}

/// The three collaborators the engine needs, usually backed by one store value.
#[derive(Clone)]
pub struct Stores {
    pub menu: Arc<dyn MenuStore>,
    pub inventory: Arc<dyn InventoryStore>,
    pub orders: Arc<dyn OrderStore>,
}

impl Stores {
    /// Uses one value for menu, inventory and orders.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: MenuStore + InventoryStore + OrderStore + 'static,
    {
        Self {
            menu: store.clone(),
            inventory: store.clone(),
            orders: store,
        }
    }

    /// JSON files under `config.data_dir` when set, otherwise an empty in-memory store.
    pub async fn from_config(config: &Config) -> StoreResult<Self> {
        match &config.data_dir {
            Some(dir) => {
                let store = JsonFileStore::open(dir).await?;
                info!(data_dir = %dir.display(), "Using JSON file store");
                Ok(Self::shared(Arc::new(store)))
            }
            None => {
                info!("Using in-memory store");
                Ok(Self::shared(Arc::new(InMemoryStore::default())))
            }
        }
    }
}
