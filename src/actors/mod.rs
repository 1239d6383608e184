use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceRequest;
use crate::catalog::Entity;
use crate::domain::OrderStatus;
use crate::error::AdminError;
use crate::messages::{AdminRequest, OrderRequest, ServiceResponse, StatsRequest, SyncRequest};
use crate::orders::{OrderError, OrderSelection};
use crate::panel::AdminPanel;
use crate::store::KeyValueStore;

// =============================================================================
// ADMIN SERVICE
// =============================================================================

/// Owns the admin panel and serves one request at a time.
///
/// Every request runs to completion against the store before the next one is
/// taken from the mailbox, so no two mutations ever interleave.
pub struct AdminService<S> {
    receiver: mpsc::Receiver<AdminRequest>,
    panel: AdminPanel<S>,
}

impl<S: KeyValueStore + Send + 'static> AdminService<S> {
    pub fn new(buffer_size: usize, panel: AdminPanel<S>) -> (Self, mpsc::Sender<AdminRequest>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, panel }, sender)
    }

    #[instrument(name = "admin_service", skip(self))]
    pub async fn run(mut self) {
        info!("AdminService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AdminRequest::Category(request) => self.handle_resource(request),
                AdminRequest::Brand(request) => self.handle_resource(request),
                AdminRequest::Product(request) => self.handle_resource(request),
                AdminRequest::Order(request) => self.handle_order(request),
                AdminRequest::Stats(request) => self.handle_stats(request),
                AdminRequest::Sync(request) => self.handle_sync(request),
                AdminRequest::Shutdown => {
                    info!("AdminService shutting down");
                    break;
                }
            }
        }
        info!("AdminService stopped");
    }

    #[instrument(fields(kind = %T::KIND), skip(self, request))]
    fn handle_resource<T: Entity>(&mut self, request: ResourceRequest<T>) {
        match request {
            ResourceRequest::Create { payload, respond_to } => {
                debug!("Processing create request");
                let result = self.panel.create::<T>(payload);
                match &result {
                    Ok(item) => info!(id = item.id(), "Created"),
                    Err(e) => warn!(error = %e, "Create rejected"),
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Get { id, respond_to } => {
                debug!(id, "Processing get request");
                let _ = respond_to.send(self.panel.get::<T>(id));
            }
            ResourceRequest::List { respond_to } => {
                debug!("Processing list request");
                let _ = respond_to.send(self.panel.list::<T>());
            }
            ResourceRequest::Update { id, patch, respond_to } => {
                debug!(id, "Processing update request");
                let result = self.panel.update::<T>(id, patch);
                if let Err(e) = &result {
                    warn!(id, error = %e, "Update rejected");
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Delete { id, respond_to } => {
                debug!(id, "Processing delete request");
                let result = self.panel.delete::<T>(id);
                if let Err(e) = &result {
                    warn!(id, error = %e, "Delete rejected");
                }
                let _ = respond_to.send(result);
            }
        }
    }

    fn handle_order(&mut self, request: OrderRequest) {
        match request {
            OrderRequest::SetStatus {
                order_id,
                username,
                status,
                respond_to,
            } => {
                let result = self.panel.set_order_status(&order_id, &username, status);
                if let Err(e) = &result {
                    warn!(%order_id, %username, error = %e, "Status update rejected");
                }
                let _ = respond_to.send(result);
            }
            OrderRequest::BulkSetStatus {
                selections,
                status,
                respond_to,
            } => self.handle_bulk_status(selections, status, respond_to),
            OrderRequest::History { username, respond_to } => {
                debug!(%username, "Processing order history request");
                let _ = respond_to.send(self.panel.order_history(&username));
            }
            OrderRequest::List { respond_to } => {
                debug!("Processing order list request");
                let _ = respond_to.send(self.panel.list_orders());
            }
        }
    }

    #[instrument(skip_all, fields(count = selections.len(), status = %status))]
    fn handle_bulk_status(
        &mut self,
        selections: Vec<OrderSelection>,
        status: OrderStatus,
        respond_to: ServiceResponse<usize, OrderError>,
    ) {
        let updated = self.panel.bulk_set_order_status(&selections, status);
        let _ = respond_to.send(Ok(updated));
    }

    fn handle_stats(&self, request: StatsRequest) {
        match request {
            StatsRequest::Snapshot { respond_to } => {
                debug!("Processing snapshot request");
                let _ = respond_to.send(self.panel.snapshot().map_err(AdminError::from));
            }
            StatsRequest::Report { now, respond_to } => {
                debug!(%now, "Processing report request");
                let _ = respond_to.send(self.panel.report_at(now).map_err(AdminError::from));
            }
        }
    }

    #[instrument(skip(self, request))]
    fn handle_sync(&mut self, request: SyncRequest) {
        match request {
            SyncRequest::SyncNewSeedProducts { respond_to } => {
                let _ = respond_to.send(self.panel.sync_new_seed_products().map_err(AdminError::from));
            }
            SyncRequest::PublishCategories { respond_to } => {
                let _ = respond_to.send(self.panel.publish_categories().map_err(AdminError::from));
            }
            SyncRequest::ForceImportSeed { respond_to } => {
                let _ = respond_to.send(self.panel.force_import_seed().map_err(AdminError::from));
            }
            SyncRequest::ResetAll { respond_to } => {
                let result = self.panel.reset_all().map_err(AdminError::from);
                if let Err(e) = &result {
                    warn!(error = %e, "Reset failed");
                }
                let _ = respond_to.send(result);
            }
            SyncRequest::CheckSession { respond_to } => {
                let _ = respond_to.send(self.panel.require_session());
            }
            SyncRequest::Logout { respond_to } => {
                let _ = respond_to.send(self.panel.logout().map_err(AdminError::from));
            }
        }
    }
}
