//! # Mock Framework
//!
//! Utilities for testing [`OrderClient`] without a running service.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its mailbox, then
//! helpers like [`expect_create`] or [`expect_close`] to answer requests by hand.

use crate::clients::OrderClient;
use crate::domain::{Order, OrderDraft};
use crate::error::OrderError;
use crate::messages::{OrderRequest, ServiceResponse};
use crate::store::InMemoryStore;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Creates a client wired to a channel the test controls. Reporting reads hit an empty
/// in-memory store.
pub fn create_mock_client(buffer_size: usize) -> (OrderClient, mpsc::Receiver<OrderRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let store = Arc::new(InMemoryStore::default());
    (OrderClient::new(sender, store.clone(), store), receiver)
}

/// Helper to verify that the next message is a CreateOrder request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<OrderRequest>,
) -> Option<(OrderDraft, ServiceResponse<Order, OrderError>)> {
    match receiver.recv().await {
        Some(OrderRequest::CreateOrder { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a CloseOrder request
pub async fn expect_close(
    receiver: &mut mpsc::Receiver<OrderRequest>,
) -> Option<(String, ServiceResponse<Order, OrderError>)> {
    match receiver.recv().await {
        Some(OrderRequest::CloseOrder { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            let draft = OrderDraft::new("Test").with_item("latte", 1);
            client.create_order(draft).await
        });

        let (draft, responder) = expect_create(&mut receiver).await.expect("Expected CreateOrder");
        assert_eq!(draft.customer_name, "Test");
        let order = draft.into_open_order("order_1".to_string(), Utc::now());
        responder.send(Ok(order.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(order));
    }
}
