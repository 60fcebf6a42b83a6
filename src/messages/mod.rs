use crate::domain::{Order, OrderDraft};
use crate::error::OrderError;
use tokio::sync::oneshot;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Commands handled by [`crate::actors::OrderService`], one at a time.
///
/// Everything that reads stock and then writes orders or inventory travels through here;
/// reporting reads go to the stores directly.
#[derive(Debug)]
pub enum OrderRequest {
    CreateOrder {
        draft: OrderDraft,
        respond_to: ServiceResponse<Order, OrderError>,
    },
    UpdateOrder {
        id: String,
        draft: OrderDraft,
        respond_to: ServiceResponse<Order, OrderError>,
    },
    CloseOrder {
        id: String,
        respond_to: ServiceResponse<Order, OrderError>,
    },
    DeleteOrder {
        id: String,
        respond_to: ServiceResponse<(), OrderError>,
    },
    Shutdown,
}
