use thiserror::Error;

use crate::catalog::CatalogError;
use crate::orders::OrderError;
use crate::store::StoreError;

/// System-level failures: startup, session checks and anything that is not
/// scoped to one catalog or order request.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Order error: {0}")]
    Order(#[from] OrderError),
    #[error("No admin session present")]
    SessionMissing,
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
    #[error("Actor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
