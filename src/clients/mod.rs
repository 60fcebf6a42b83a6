#[macro_use]
mod macros;
mod order_client;

pub use order_client::OrderClient;
