use super::{InventoryStore, MenuStore, OrderStore, StoreResult};
use crate::domain::{IngredientStock, Order, Recipe};
use crate::error::StoreError;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local store for all three collections. Records keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    menu: RwLock<Vec<Recipe>>,
    stock: RwLock<Vec<IngredientStock>>,
    orders: RwLock<Vec<Order>>,
}

impl InMemoryStore {
    pub fn new(menu: Vec<Recipe>, stock: Vec<IngredientStock>) -> Self {
        Self {
            menu: RwLock::new(menu),
            stock: RwLock::new(stock),
            orders: RwLock::new(Vec::new()),
        }
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
            ..self
        }
    }

    /// Replaces the menu. Menu management lives outside the engine; this exists for seeding.
    pub async fn write_menu(&self, menu: Vec<Recipe>) {
        *self.menu.write().await = menu;
    }
}

#[async_trait]
impl MenuStore for InMemoryStore {
    async fn all_recipes(&self) -> StoreResult<Vec<Recipe>> {
        Ok(self.menu.read().await.clone())
    }
}

#[async_trait]
impl InventoryStore for InMemoryStore {
    async fn all_stock(&self) -> StoreResult<Vec<IngredientStock>> {
        Ok(self.stock.read().await.clone())
    }

    async fn save_stock(&self, stock: Vec<IngredientStock>) -> StoreResult<()> {
        *self.stock.write().await = stock;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn all_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn order(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.orders.read().await.iter().find(|o| o.id == id).cloned())
    }

    async fn create_order(&self, order: Order) -> StoreResult<()> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::DuplicateId(order.id));
        }
        orders.push(order);
        Ok(())
    }

    async fn rewrite_order(&self, id: &str, order: Order) -> StoreResult<()> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|o| o.id == id) {
            Some(slot) => {
                *slot = order;
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn delete_order(&self, id: &str) -> StoreResult<()> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|o| o.id != id);
        if orders.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
