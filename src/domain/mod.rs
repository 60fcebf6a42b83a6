pub mod order;
pub mod recipe;
pub mod stock;

pub use order::*;
pub use recipe::*;
pub use stock::*;
