use cafe_orders::app_system::{setup_tracing, OrderSystem};
use cafe_orders::config::Config;
use cafe_orders::domain::{IngredientStock, OrderDraft, Recipe};
use cafe_orders::store::{InMemoryStore, Stores};
use std::sync::Arc;
use tracing::{error, info, Instrument};

fn demo_store() -> InMemoryStore {
    InMemoryStore::new(
        vec![
            Recipe::new("latte", "Caffe Latte", 3.5)
                .with_ingredient("coffee_beans", 20.0)
                .with_ingredient("milk", 200.0),
            Recipe::new("espresso", "Espresso", 2.0).with_ingredient("coffee_beans", 18.0),
        ],
        vec![
            IngredientStock::new("coffee_beans", "Coffee Beans", 100.0, "g"),
            IngredientStock::new("milk", "Milk", 5000.0, "ml"),
        ],
    )
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = Config::from_env();
    setup_tracing(&config);

    info!("Starting café order system");

    let system = match &config.data_dir {
        Some(_) => OrderSystem::from_config(&config)
            .await
            .map_err(|e| e.to_string())?,
        None => {
            info!("No data directory configured, using demo menu and stock");
            OrderSystem::start(Stores::shared(Arc::new(demo_store())), config.mailbox_size)
        }
    };
    let client = &system.order_client;

    let span = tracing::info_span!("admissions");
    let first = async {
        let first = client
            .create_order(OrderDraft::new("Alice").with_item("latte", 3))
            .await
            .map_err(|e| e.to_string())?;
        info!(order_id = %first.id, "First order admitted");

        match client
            .create_order(OrderDraft::new("Bob").with_item("latte", 3))
            .await
        {
            Ok(order) => info!(order_id = %order.id, "Second order admitted"),
            Err(e) => error!(error = %e, "Second order rejected"),
        }

        match client
            .create_order(OrderDraft::new("Carol").with_item("latte", 2))
            .await
        {
            Ok(order) => info!(order_id = %order.id, "Boundary order admitted"),
            Err(e) => error!(error = %e, "Boundary order rejected"),
        }
        Ok::<_, String>(first)
    }
    .instrument(span)
    .await?;

    let closed = client
        .close_order(first.id.clone())
        .await
        .map_err(|e| e.to_string())?;
    info!(order_id = %closed.id, status = %closed.status, "Order closed");

    for stock in client.list_inventory().await.map_err(|e| e.to_string())? {
        info!(
            ingredient_id = %stock.ingredient_id,
            quantity = stock.quantity,
            unit = %stock.unit,
            "Stock level"
        );
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
