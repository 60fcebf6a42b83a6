use crate::domain::{IngredientStock, Order, OrderDraft};
use crate::error::OrderError;
use crate::messages::OrderRequest;
use crate::store::{InventoryStore, OrderStore};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Handle for the order service.
///
/// Mutating calls are queued on the service mailbox. Reporting reads (`get_order`,
/// `list_orders`, `list_inventory`) hit the stores directly and never wait behind admissions.
#[derive(Clone)]
pub struct OrderClient {
    sender: mpsc::Sender<OrderRequest>,
    orders: Arc<dyn OrderStore>,
    inventory: Arc<dyn InventoryStore>,
}

impl OrderClient {
    pub fn new(
        sender: mpsc::Sender<OrderRequest>,
        orders: Arc<dyn OrderStore>,
        inventory: Arc<dyn InventoryStore>,
    ) -> Self {
        Self {
            sender,
            orders,
            inventory,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<Order, OrderError> {
        debug!("Reading order");
        self.orders
            .order(&id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Listing orders");
        Ok(self.orders.all_orders().await?)
    }

    #[instrument(skip(self))]
    pub async fn list_inventory(&self) -> Result<Vec<IngredientStock>, OrderError> {
        debug!("Listing inventory");
        Ok(self.inventory.all_stock().await?)
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), OrderError> {
        debug!("Sending shutdown request");
        self.sender
            .send(OrderRequest::Shutdown)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(OrderClient => fn create_order(draft: OrderDraft) -> Order as OrderRequest::CreateOrder);
client_method!(OrderClient => fn update_order(id: String, draft: OrderDraft) -> Order as OrderRequest::UpdateOrder);
client_method!(OrderClient => fn close_order(id: String) -> Order as OrderRequest::CloseOrder);
client_method!(OrderClient => fn delete_order(id: String) -> () as OrderRequest::DeleteOrder);
