use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actor_framework::ResourceClient;
use crate::actors::AdminService;
use crate::clients::{BrandClient, CategoryClient, OrderClient, ProductClient, StatsClient, SyncClient};
use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::events::{AdminEvent, EventBus};
use crate::messages::AdminRequest;
use crate::panel::AdminPanel;
use crate::store::KeyValueStore;
use crate::sync::SeedCatalog;

/// The running admin system.
///
/// Opens the panel over the given storage, starts the service task and hands
/// out one typed client per concern. All clients share the service mailbox.
pub struct AdminSystem {
    pub categories: CategoryClient,
    pub brands: BrandClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub stats: StatsClient,
    pub sync: SyncClient,
    sender: mpsc::Sender<AdminRequest>,
    events: EventBus,
    handle: JoinHandle<()>,
}

impl AdminSystem {
    /// Must be called from within a tokio runtime.
    pub fn start<S>(storage: S, seed: SeedCatalog, config: &AdminConfig) -> Result<Self, AdminError>
    where
        S: KeyValueStore + Send + 'static,
    {
        let events = EventBus::new(config.event_capacity);
        let panel = AdminPanel::open(storage, seed, events.clone())?;
        if config.require_session {
            panel.require_session()?;
        }

        let (service, sender) = AdminService::new(config.mailbox_capacity, panel);
        let handle = tokio::spawn(service.run());
        info!(mailbox = config.mailbox_capacity, "Admin system started");

        Ok(Self {
            categories: CategoryClient::new(ResourceClient::new(sender.clone())),
            brands: BrandClient::new(ResourceClient::new(sender.clone())),
            products: ProductClient::new(ResourceClient::new(sender.clone())),
            orders: OrderClient::new(sender.clone()),
            stats: StatsClient::new(sender.clone()),
            sync: SyncClient::new(sender.clone()),
            sender,
            events,
            handle,
        })
    }

    /// Events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.events.subscribe()
    }

    pub async fn shutdown(self) -> Result<(), AdminError> {
        info!("Shutting down system...");
        // Requests already queued are served before the shutdown message.
        if self.sender.send(AdminRequest::Shutdown).await.is_err() {
            info!("Service already stopped");
        }

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(AdminError::Join(e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
