use crate::app_system::OrderSystem;
use crate::config::Config;
use crate::domain::{IngredientStock, OrderDraft, OrderStatus, Recipe};
use crate::engine::{compute_reservations, RecipeIndex};
use crate::error::OrderError;
use crate::store::{InMemoryStore, InventoryStore, JsonFileStore, OrderStore, Stores};
use std::sync::Arc;

fn menu() -> Vec<Recipe> {
    vec![
        Recipe::new("latte", "Caffe Latte", 3.5)
            .with_ingredient("coffee_beans", 20.0)
            .with_ingredient("milk", 200.0),
        Recipe::new("espresso", "Espresso", 2.0).with_ingredient("coffee_beans", 18.0),
        Recipe::new("tea", "Black Tea", 1.5).with_ingredient("tea_leaves", 5.0),
    ]
}

fn stock() -> Vec<IngredientStock> {
    vec![
        IngredientStock::new("coffee_beans", "Coffee Beans", 100.0, "g"),
        IngredientStock::new("milk", "Milk", 5000.0, "ml"),
        IngredientStock::new("tea_leaves", "Tea Leaves", 50.0, "g"),
    ]
}

fn start() -> (Arc<InMemoryStore>, OrderSystem) {
    let store = Arc::new(InMemoryStore::new(menu(), stock()));
    let system = OrderSystem::start(Stores::shared(store.clone()), 32);
    (store, system)
}

async fn beans(store: &InMemoryStore) -> f64 {
    store
        .all_stock()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.ingredient_id == "coffee_beans")
        .map(|s| s.quantity)
        .unwrap()
}

fn latte(customer: &str, quantity: i32) -> OrderDraft {
    OrderDraft::new(customer).with_item("latte", quantity)
}

#[tokio::test]
async fn test_reservation_boundary_and_close() {
    let (store, system) = start();
    let client = &system.order_client;

    let first = client.create_order(latte("Alice", 3)).await.unwrap();

    let rejected = client.create_order(latte("Bob", 3)).await.unwrap_err();
    assert_eq!(
        rejected,
        OrderError::InsufficientStock {
            ingredient_id: "coffee_beans".into(),
            required: 60.0,
            available: 40.0,
        }
    );

    let boundary = client.create_order(latte("Carol", 2)).await.unwrap();
    assert_eq!(boundary.status, OrderStatus::Open);

    let closed = client.close_order(first.id.clone()).await.unwrap();
    assert_eq!(closed.status, OrderStatus::Closed);
    assert_eq!(beans(&store).await, 40.0);

    // Only Carol's 40g remains reserved against the 40g left.
    let index = RecipeIndex::from_recipes(menu());
    let open = store.open_orders().await.unwrap();
    let reserved = compute_reservations(&open, &index).unwrap();
    assert_eq!(reserved.get("coffee_beans"), 40.0);
    assert!(client.create_order(latte("Dan", 1)).await.is_err());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_second_close_is_rejected_and_deducts_once() {
    let (store, system) = start();
    let client = &system.order_client;

    let order = client.create_order(latte("Alice", 2)).await.unwrap();
    client.close_order(order.id.clone()).await.unwrap();
    assert_eq!(
        client.close_order(order.id.clone()).await,
        Err(OrderError::AlreadyClosed(order.id.clone()))
    );
    assert_eq!(beans(&store).await, 60.0);

    assert_eq!(
        client.close_order("order_99".into()).await,
        Err(OrderError::OrderNotFound("order_99".into()))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_admission_changes_nothing() {
    let (store, system) = start();
    let client = &system.order_client;

    client.create_order(latte("Alice", 4)).await.unwrap();
    let orders_before = store.all_orders().await.unwrap();
    let stock_before = store.all_stock().await.unwrap();

    let draft = OrderDraft::new("Bob")
        .with_item("tea", 1)
        .with_item("espresso", 2);
    assert_eq!(
        client.create_order(draft).await.unwrap_err().short_ingredient(),
        Some("coffee_beans")
    );

    assert_eq!(store.all_orders().await.unwrap(), orders_before);
    assert_eq!(store.all_stock().await.unwrap(), stock_before);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_product_fails_at_admission() {
    let (store, system) = start();
    let result = system
        .order_client
        .create_order(OrderDraft::new("Alice").with_item("mocha", 1))
        .await;
    assert_eq!(result, Err(OrderError::ProductNotFound("mocha".into())));
    assert!(store.all_orders().await.unwrap().is_empty());
    system.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_cannot_oversell() {
    let (store, system) = start();

    let tasks: Vec<_> = ["Alice", "Bob"]
        .into_iter()
        .map(|customer| {
            let client = system.order_client.clone();
            tokio::spawn(async move { client.create_order(latte(customer, 3)).await })
        })
        .collect();

    let mut admitted = 0;
    let mut short = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => admitted += 1,
            Err(e) => {
                assert_eq!(e.short_ingredient(), Some("coffee_beans"));
                short += 1;
            }
        }
    }
    assert_eq!((admitted, short), (1, 1));
    assert_eq!(store.open_orders().await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reservations_never_exceed_stock() {
    let (store, system) = start();
    let index = RecipeIndex::from_recipes(menu());

    let drafts: Vec<OrderDraft> = (1..=12)
        .map(|n| {
            let draft = OrderDraft::new(format!("customer {n}"));
            match n % 3 {
                0 => draft.with_item("espresso", n % 4 + 1),
                1 => draft.with_item("latte", n % 2 + 1).with_item("tea", n),
                _ => draft.with_item("tea", n % 5 + 1),
            }
        })
        .collect();

    let tasks: Vec<_> = drafts
        .into_iter()
        .map(|draft| {
            let client = system.order_client.clone();
            tokio::spawn(async move { client.create_order(draft).await })
        })
        .collect();
    for task in tasks {
        let _ = task.await.unwrap();
    }

    let open = store.open_orders().await.unwrap();
    assert!(!open.is_empty());
    let reserved = compute_reservations(&open, &index).unwrap();
    for initial in stock() {
        assert!(
            reserved.get(&initial.ingredient_id) <= initial.quantity,
            "{} oversold",
            initial.ingredient_id
        );
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_close_fails_when_stock_shrank_underneath() {
    let (store, system) = start();
    let client = &system.order_client;

    let order = client.create_order(latte("Alice", 2)).await.unwrap();

    // Inventory edited outside the engine after admission.
    let mut edited = stock();
    edited[0].quantity = 10.0;
    store.save_stock(edited.clone()).await.unwrap();

    let err = client.close_order(order.id.clone()).await.unwrap_err();
    assert_eq!(err.short_ingredient(), Some("coffee_beans"));
    assert_eq!(store.all_stock().await.unwrap(), edited);
    assert_eq!(
        client.get_order(order.id.clone()).await.unwrap().status,
        OrderStatus::Open
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_close_fails_when_product_left_the_menu() {
    let (store, system) = start();
    let client = &system.order_client;

    let order = client.create_order(latte("Alice", 2)).await.unwrap();

    let without_latte = menu()
        .into_iter()
        .filter(|r| r.product_id != "latte")
        .collect();
    store.write_menu(without_latte).await;

    assert_eq!(
        client.close_order(order.id.clone()).await,
        Err(OrderError::ProductNotFound("latte".into()))
    );
    assert_eq!(store.all_stock().await.unwrap(), stock());
    assert_eq!(
        client.get_order(order.id.clone()).await.unwrap().status,
        OrderStatus::Open
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_negative_recipe_quantity_never_adds_stock() {
    let mut menu = menu();
    menu.push(Recipe::new("refund", "Refund", 0.0).with_ingredient("coffee_beans", -50.0));
    let store = Arc::new(InMemoryStore::new(
        menu,
        vec![IngredientStock::new("coffee_beans", "Coffee Beans", 10.0, "g")],
    ));
    let system = OrderSystem::start(Stores::shared(store.clone()), 32);
    let client = &system.order_client;

    let err = client
        .create_order(OrderDraft::new("Mallory").with_item("refund", 2))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidRecipe { ref product_id, .. } if product_id == "refund"));
    assert!(store.all_orders().await.unwrap().is_empty());
    assert_eq!(beans(&store).await, 10.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reporting_reads() {
    let (_, system) = start();
    let client = &system.order_client;

    let order = client.create_order(latte("Alice", 1)).await.unwrap();
    assert_eq!(client.get_order(order.id.clone()).await.unwrap(), order);
    assert_eq!(client.list_orders().await.unwrap(), vec![order]);
    assert_eq!(client.list_inventory().await.unwrap(), stock());
    assert_eq!(
        client.get_order("nope".into()).await,
        Err(OrderError::OrderNotFound("nope".into()))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_json_file_backed_system() {
    let dir = tempfile::tempdir().unwrap();
    let seed = JsonFileStore::open(dir.path()).await.unwrap();
    seed.write_menu(&menu()).await.unwrap();
    seed.save_stock(stock()).await.unwrap();

    let config = Config {
        data_dir: Some(dir.path().to_path_buf()),
        ..Config::default()
    };
    let system = OrderSystem::from_config(&config).await.unwrap();
    let order = system
        .order_client
        .create_order(latte("Alice", 2))
        .await
        .unwrap();
    system.order_client.close_order(order.id.clone()).await.unwrap();
    system.shutdown().await.unwrap();

    let reopened = JsonFileStore::open(dir.path()).await.unwrap();
    let stored = reopened.order(&order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Closed);
    let beans = reopened
        .all_stock()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.ingredient_id == "coffee_beans")
        .unwrap();
    assert_eq!(beans.quantity, 60.0);
}
