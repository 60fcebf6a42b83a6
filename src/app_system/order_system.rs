use crate::actors::OrderService;
use crate::clients::OrderClient;
use crate::config::Config;
use crate::error::StoreError;
use crate::store::Stores;
use tracing::{error, info, instrument};

/// Starts the order service and hands out its client.
pub struct OrderSystem {
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns the service over `stores`. Must be called inside a tokio runtime.
    #[instrument(name = "order_system", skip(stores))]
    pub fn start(stores: Stores, mailbox_size: usize) -> Self {
        info!("Starting order system");

        let (order_service, order_client) = OrderService::new(mailbox_size, stores);
        let handles = vec![tokio::spawn(order_service.run())];

        info!("Order system started successfully");
        Self {
            order_client,
            handles,
        }
    }

    /// Builds stores from `config` and starts the system on them.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let stores = Stores::from_config(config).await?;
        Ok(Self::start(stores, config.mailbox_size))
    }

    /// Stops the service after it finishes requests already queued ahead of the shutdown.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down order system");

        let _ = self.order_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Service task failed: {e}"));
            }
        }

        info!("Order system shutdown complete");
        Ok(())
    }
}
