use tokio::sync::mpsc;

use crate::domain::{Order, OrderStatus};
use crate::messages::{AdminRequest, OrderRequest};
use crate::orders::{OrderError, OrderSelection, OrderView};

/// Client for order status management and the order table.
#[derive(Clone)]
pub struct OrderClient {
    sender: mpsc::Sender<AdminRequest>,
}

impl OrderClient {
    pub fn new(sender: mpsc::Sender<AdminRequest>) -> Self {
        Self { sender }
    }

    /// Parse a status name and apply it; unknown names fail before any request
    /// is sent.
    pub async fn set_order_status_named(
        &self,
        order_id: String,
        username: String,
        status: &str,
    ) -> Result<OrderStatus, OrderError> {
        let status: OrderStatus = status.parse()?;
        self.set_order_status(order_id, username, status).await
    }
}

client_method!(OrderClient => fn set_order_status(order_id: String, username: String, status: OrderStatus) -> OrderStatus as OrderRequest::SetStatus, Error = OrderError);
client_method!(OrderClient => fn bulk_set_order_status(selections: Vec<OrderSelection>, status: OrderStatus) -> usize as OrderRequest::BulkSetStatus, Error = OrderError);
client_method!(OrderClient => fn order_history(username: String) -> Vec<Order> as OrderRequest::History, Error = OrderError);
client_method!(OrderClient => fn list_orders() -> Vec<OrderView> as OrderRequest::List, Error = OrderError);
