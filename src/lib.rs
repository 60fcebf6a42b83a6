//! # Café order admission
//!
//! Decides whether a new order can be made from the ingredients on hand once every Open
//! order's needs are set aside, and deducts stock for good when an order is closed.
//!
//! - [`engine`] holds the reservation and availability math.
//! - [`actors::OrderService`] serializes every read-check-write sequence so concurrent
//!   admissions cannot oversell.
//! - [`clients::OrderClient`] is the handle callers use.
//! - [`store`] defines the menu, inventory and order collaborators.
//!
//! ```no_run
//! # async fn demo() -> Result<(), cafe_orders::error::OrderError> {
//! use cafe_orders::{app_system::OrderSystem, config::Config, domain::OrderDraft};
//!
//! let system = OrderSystem::from_config(&Config::from_env()).await?;
//! let order = system
//!     .order_client
//!     .create_order(OrderDraft::new("Alice").with_item("latte", 2))
//!     .await?;
//! system.order_client.close_order(order.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod actors;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod messages;
pub mod store;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;
