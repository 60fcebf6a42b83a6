use super::{InventoryStore, MenuStore, OrderStore, StoreResult};
use crate::domain::{IngredientStock, Order, Recipe};
use crate::error::StoreError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

const MENU_FILE: &str = "menu_items.json";
const INVENTORY_FILE: &str = "inventory.json";
const ORDERS_FILE: &str = "orders.json";

/// Stores each collection as a JSON array in `data_dir`.
///
/// A missing file reads as an empty collection. Writes go to a sibling temp file that is then
/// renamed over the original, so readers never observe a partially written collection.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    // Serializes read-modify-write cycles on orders.json.
    orders_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens (and creates, if needed) the data directory.
    pub async fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;
        Ok(Self {
            data_dir,
            orders_lock: Mutex::new(()),
        })
    }

    /// Replaces the menu file. Menu management lives outside the engine; this exists for seeding.
    pub async fn write_menu(&self, menu: &[Recipe]) -> StoreResult<()> {
        self.write_collection(MENU_FILE, menu).await
    }

    #[instrument(skip(self))]
    async fn read_collection<T: DeserializeOwned>(&self, file: &str) -> StoreResult<Vec<T>> {
        let path = self.data_dir.join(file);
        match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Collection file missing, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn write_collection<T: Serialize>(&self, file: &str, records: &[T]) -> StoreResult<()> {
        let path = self.data_dir.join(file);
        let tmp = self.data_dir.join(format!("{file}.tmp"));
        let bytes = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!("Collection written");
        Ok(())
    }
}

#[async_trait]
impl MenuStore for JsonFileStore {
    async fn all_recipes(&self) -> StoreResult<Vec<Recipe>> {
        self.read_collection(MENU_FILE).await
    }
}

#[async_trait]
impl InventoryStore for JsonFileStore {
    async fn all_stock(&self) -> StoreResult<Vec<IngredientStock>> {
        self.read_collection(INVENTORY_FILE).await
    }

    async fn save_stock(&self, stock: Vec<IngredientStock>) -> StoreResult<()> {
        self.write_collection(INVENTORY_FILE, &stock).await
    }
}

#[async_trait]
impl OrderStore for JsonFileStore {
    async fn all_orders(&self) -> StoreResult<Vec<Order>> {
        self.read_collection(ORDERS_FILE).await
    }

    async fn order(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.all_orders().await?.into_iter().find(|o| o.id == id))
    }

    async fn create_order(&self, order: Order) -> StoreResult<()> {
        let _guard = self.orders_lock.lock().await;
        let mut orders: Vec<Order> = self.read_collection(ORDERS_FILE).await?;
        if orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::DuplicateId(order.id));
        }
        orders.push(order);
        self.write_collection(ORDERS_FILE, &orders).await
    }

    async fn rewrite_order(&self, id: &str, order: Order) -> StoreResult<()> {
        let _guard = self.orders_lock.lock().await;
        let mut orders: Vec<Order> = self.read_collection(ORDERS_FILE).await?;
        let slot = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = order;
        self.write_collection(ORDERS_FILE, &orders).await
    }

    async fn delete_order(&self, id: &str) -> StoreResult<()> {
        let _guard = self.orders_lock.lock().await;
        let mut orders: Vec<Order> = self.read_collection(ORDERS_FILE).await?;
        let before = orders.len();
        orders.retain(|o| o.id != id);
        if orders.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.write_collection(ORDERS_FILE, &orders).await
    }
}
