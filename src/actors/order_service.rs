use crate::clients::OrderClient;
use crate::domain::{Order, OrderDraft, OrderStatus};
use crate::engine::{
    check_availability, compute_reservations, line_usage, validate_draft, InventoryLedger,
    RecipeIndex,
};
use crate::error::{ErrorKind, OrderError, StoreError, ValidationError};
use crate::messages::OrderRequest;
use crate::store::{MenuStore, OrderStore, Stores};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Answer a request unless its caller has already gone away.
macro_rules! respond {
    ($respond_to:expr, $handler:expr) => {{
        if $respond_to.is_closed() {
            debug!("Caller went away, skipping request");
        } else {
            let result = $handler.await;
            log_outcome(&result);
            let _ = $respond_to.send(result);
        }
    }};
}

fn log_outcome<T>(result: &Result<T, OrderError>) {
    if let Err(e) = result {
        match e.kind() {
            ErrorKind::Storage | ErrorKind::Unavailable => error!(error = %e, "Request failed"),
            _ => warn!(error = %e, "Request rejected"),
        }
    }
}

/// Owns every read-check-write sequence on orders and inventory.
///
/// The mailbox is drained one request at a time, so an admission and a close (or two
/// admissions) never interleave between reading stock and persisting their result. This is the
/// only place that writes orders or inventory on behalf of the engine.
pub struct OrderService {
    receiver: mpsc::Receiver<OrderRequest>,
    menu: Arc<dyn MenuStore>,
    orders: Arc<dyn OrderStore>,
    ledger: InventoryLedger,
    next_id: u64,
}

impl OrderService {
    pub fn new(buffer_size: usize, stores: Stores) -> (Self, OrderClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let client = OrderClient::new(sender, stores.orders.clone(), stores.inventory.clone());
        (Self::with_receiver(receiver, stores), client)
    }

    fn with_receiver(receiver: mpsc::Receiver<OrderRequest>, stores: Stores) -> Self {
        Self {
            receiver,
            menu: stores.menu,
            orders: stores.orders,
            ledger: InventoryLedger::new(stores.inventory),
            next_id: 1,
        }
    }

    #[instrument(name = "order_service", skip(self))]
    pub async fn run(mut self) {
        info!("OrderService starting");
        self.seed_next_id().await;

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                OrderRequest::CreateOrder { draft, respond_to } => {
                    respond!(respond_to, self.handle_create_order(draft));
                }
                OrderRequest::UpdateOrder {
                    id,
                    draft,
                    respond_to,
                } => {
                    respond!(respond_to, self.handle_update_order(id, draft));
                }
                OrderRequest::CloseOrder { id, respond_to } => {
                    respond!(respond_to, self.handle_close_order(id));
                }
                OrderRequest::DeleteOrder { id, respond_to } => {
                    respond!(respond_to, self.handle_delete_order(id));
                }
                OrderRequest::Shutdown => {
                    info!("OrderService shutting down");
                    break;
                }
            }
        }

        info!("OrderService stopped");
    }

    /// Admission: validate shape, reject taken ids, check stock against every Open order,
    /// then persist as Open.
    #[instrument(
        fields(customer = %draft.customer_name, lines = draft.items.len()),
        skip(self, draft)
    )]
    async fn handle_create_order(&mut self, draft: OrderDraft) -> Result<Order, OrderError> {
        info!("Processing create_order request");
        validate_draft(&draft)?;

        if let Some(id) = &draft.id {
            if self.orders.order(id).await?.is_some() {
                return Err(OrderError::DuplicateOrderId(id.clone()));
            }
        }

        let index = RecipeIndex::load(self.menu.as_ref()).await?;
        let open_orders = self.orders.open_orders().await?;
        let reserved = compute_reservations(&open_orders, &index)?;
        let stock = self.ledger.snapshot().await?;
        debug!(open_orders = open_orders.len(), "Reservations computed");

        check_availability(&draft.items, &index, &stock, &reserved)?;

        // Ids are handed out to admitted orders only.
        let id = match &draft.id {
            Some(id) => id.clone(),
            None => self.next_order_id().await?,
        };
        let order = draft.into_open_order(id, Utc::now());
        self.orders
            .create_order(order.clone())
            .await
            .map_err(|e| match e {
                StoreError::DuplicateId(id) => OrderError::DuplicateOrderId(id),
                other => other.into(),
            })?;

        info!(order_id = %order.id, "Order admitted");
        Ok(order)
    }

    /// Replaces the content of an Open order. Products must exist on the menu, but the new
    /// content is not re-checked against stock.
    #[instrument(fields(order_id = %id), skip(self, draft))]
    async fn handle_update_order(&mut self, id: String, draft: OrderDraft) -> Result<Order, OrderError> {
        info!("Processing update_order request");
        validate_draft(&draft)?;
        if let Some(draft_id) = &draft.id {
            if *draft_id != id {
                return Err(ValidationError::IdMismatch {
                    expected: id,
                    found: draft_id.clone(),
                }
                .into());
            }
        }

        let existing = self.load_open_order(&id).await?;

        let index = RecipeIndex::load(self.menu.as_ref()).await?;
        for item in &draft.items {
            index.ingredients_for(&item.product_id)?;
        }

        let order = draft.into_open_order(id.clone(), existing.created_at);
        self.orders
            .rewrite_order(&id, order.clone())
            .await
            .map_err(|e| not_found_as_order(e, &id))?;

        info!("Order updated");
        Ok(order)
    }

    /// Deducts the order's ingredients from stock and marks it Closed. On any failure the
    /// order stays Open and stock is unchanged.
    #[instrument(fields(order_id = %id), skip(self))]
    async fn handle_close_order(&mut self, id: String) -> Result<Order, OrderError> {
        info!("Processing close_order request");
        let order = self.load_open_order(&id).await?;

        let index = RecipeIndex::load(self.menu.as_ref()).await?;
        let usage = line_usage(&order.items, &index)?;
        self.ledger.apply_deductions(&usage).await?;

        let closed = Order {
            status: OrderStatus::Closed,
            ..order
        };
        if let Err(e) = self.orders.rewrite_order(&id, closed.clone()).await {
            error!(error = %e, "Persisting closed order failed, restoring stock");
            if let Err(restore_err) = self.ledger.restore(&usage).await {
                error!(error = %restore_err, "Stock restore failed");
            }
            return Err(not_found_as_order(e, &id));
        }

        info!("Order closed");
        Ok(closed)
    }

    /// Removes an Open order, releasing its reservation. Closed orders are kept for history.
    #[instrument(fields(order_id = %id), skip(self))]
    async fn handle_delete_order(&mut self, id: String) -> Result<(), OrderError> {
        info!("Processing delete_order request");
        self.load_open_order(&id).await?;
        self.orders
            .delete_order(&id)
            .await
            .map_err(|e| not_found_as_order(e, &id))?;
        info!("Order deleted");
        Ok(())
    }

    async fn load_open_order(&self, id: &str) -> Result<Order, OrderError> {
        let order = self
            .orders
            .order(id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(id.to_string()))?;
        if !order.is_open() {
            return Err(OrderError::AlreadyClosed(id.to_string()));
        }
        Ok(order)
    }

    async fn next_order_id(&mut self) -> Result<String, OrderError> {
        loop {
            let id = format!("order_{}", self.next_id);
            self.next_id += 1;
            if self.orders.order(&id).await?.is_none() {
                return Ok(id);
            }
        }
    }

    /// Starts the id counter after the highest existing `order_<n>`.
    async fn seed_next_id(&mut self) {
        match self.orders.all_orders().await {
            Ok(orders) => {
                let highest = orders
                    .iter()
                    .filter_map(|o| o.id.strip_prefix("order_")?.parse::<u64>().ok())
                    .max()
                    .unwrap_or(0);
                self.next_id = highest + 1;
                debug!(next_id = self.next_id, "Order id counter seeded");
            }
            Err(e) => warn!(error = %e, "Could not read orders to seed id counter"),
        }
    }
}

fn not_found_as_order(e: StoreError, id: &str) -> OrderError {
    match e {
        StoreError::NotFound(_) => OrderError::OrderNotFound(id.to_string()),
        other => other.into(),
    }
}
