use thiserror::Error;

use crate::domain::UnknownStatus;
use crate::store::StoreError;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order validation error: {0}")]
    Validation(String),
    #[error("No orders for user: {0}")]
    UserNotFound(String),
    #[error("Order {order_id} not found for user {username}")]
    NotFound { order_id: String, username: String },
    #[error("Order storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<UnknownStatus> for OrderError {
    fn from(err: UnknownStatus) -> Self {
        OrderError::Validation(err.to_string())
    }
}

/// A secondary history mirror could not be brought in line.
///
/// Logged and dropped; never fails the primary status change.
#[derive(Debug, Error)]
#[error("History mirror for {username} not updated: {reason}")]
pub struct SyncWarning {
    pub username: String,
    pub reason: String,
}
