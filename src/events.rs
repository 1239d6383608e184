//! Change notifications for storefront views and dashboards.
//!
//! Listeners call [`EventBus::subscribe`] and receive every event published
//! afterwards. Publishing never fails: with nobody listening the event is
//! simply dropped.

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::trace;

use crate::catalog::EntityKind;
use crate::domain::{Category, OrderStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum AdminEvent {
    /// A fresh snapshot of the categories was published to the storefront.
    CategoriesPublished(Vec<Category>),
    OrderStatusUpdated {
        order_id: String,
        username: String,
        status: OrderStatus,
        timestamp: DateTime<Utc>,
    },
    CatalogChanged { kind: EntityKind },
    /// Derived dashboard figures are stale.
    DashboardInvalidated,
    /// All admin and storefront collections were cleared.
    DataReset,
}

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AdminEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: AdminEvent) {
        trace!(?event, listeners = self.sender.receiver_count(), "publishing event");
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
