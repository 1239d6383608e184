//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] or [`create_mock_sender`] to get a client side
//! and the receiving end of its mailbox, then helpers like [`expect_create`] or
//! [`expect_order`] to assert what arrived and answer it by hand.

use tokio::sync::mpsc;

use crate::actor_framework::{ResourceClient, ResourceRequest, Response, Routable};
use crate::catalog::{CatalogError, Entity};
use crate::messages::{AdminRequest, OrderRequest, StatsRequest, SyncRequest};

/// A catalog client whose requests land on a channel the test controls.
pub fn create_mock_client<T: Routable>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<AdminRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// A raw mailbox sender for the order, stats and sync clients.
pub fn create_mock_sender(buffer_size: usize) -> (mpsc::Sender<AdminRequest>, mpsc::Receiver<AdminRequest>) {
    mpsc::channel(buffer_size)
}

async fn expect_resource<T: Routable>(receiver: &mut mpsc::Receiver<AdminRequest>) -> Option<ResourceRequest<T>> {
    T::unroute(receiver.recv().await?)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Routable>(
    receiver: &mut mpsc::Receiver<AdminRequest>,
) -> Option<(<T as Entity>::CreatePayload, Response<T, CatalogError>)> {
    match expect_resource::<T>(receiver).await? {
        ResourceRequest::Create { payload, respond_to } => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Routable>(
    receiver: &mut mpsc::Receiver<AdminRequest>,
) -> Option<(u64, Response<Option<T>, CatalogError>)> {
    match expect_resource::<T>(receiver).await? {
        ResourceRequest::Get { id, respond_to } => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an order request
pub async fn expect_order(receiver: &mut mpsc::Receiver<AdminRequest>) -> Option<OrderRequest> {
    match receiver.recv().await? {
        AdminRequest::Order(request) => Some(request),
        _ => None,
    }
}

/// Helper to verify that the next message is a stats request
pub async fn expect_stats(receiver: &mut mpsc::Receiver<AdminRequest>) -> Option<StatsRequest> {
    match receiver.recv().await? {
        AdminRequest::Stats(request) => Some(request),
        _ => None,
    }
}

/// Helper to verify that the next message is a sync request
pub async fn expect_sync(receiver: &mut mpsc::Receiver<AdminRequest>) -> Option<SyncRequest> {
    match receiver.recv().await? {
        AdminRequest::Sync(request) => Some(request),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntityKind;
    use crate::domain::{Category, CategoryCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Category>(10);

        // Test Create
        let create_task = tokio::spawn(async move {
            client
                .create(CategoryCreate {
                    name: "Fresh Vegetables".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create::<Category>(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Fresh Vegetables");
        responder
            .send(Ok(Category::new(8, "Fresh Vegetables", "fresh-vegetables")))
            .unwrap();

        let result = create_task.await.unwrap().unwrap();
        assert_eq!(result.value, "fresh-vegetables");
    }

    #[tokio::test]
    async fn test_mock_client_reports_errors() {
        let (client, mut receiver) = create_mock_client::<Category>(10);
        let get_task = tokio::spawn(async move { client.get(3).await });

        let (id, responder) = expect_get::<Category>(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 3);
        responder
            .send(Err(CatalogError::NotFound {
                kind: EntityKind::Category,
                id,
            }))
            .unwrap();

        assert!(matches!(get_task.await.unwrap(), Err(CatalogError::NotFound { id: 3, .. })));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client::<Category>(10);
        let list_task = tokio::spawn(async move { client.list().await });

        drop(receiver.recv().await);

        let result = list_task.await.unwrap();
        assert!(matches!(result, Err(CatalogError::ActorCommunication(reason)) if reason == "Actor dropped"));
    }
}
