use tokio::sync::mpsc;

use crate::domain::Category;
use crate::error::AdminError;
use crate::messages::{AdminRequest, SyncRequest};

/// Client for seed reconciliation, publication, data reset and the session.
#[derive(Clone)]
pub struct SyncClient {
    sender: mpsc::Sender<AdminRequest>,
}

impl SyncClient {
    pub fn new(sender: mpsc::Sender<AdminRequest>) -> Self {
        Self { sender }
    }
}

client_method!(SyncClient => fn sync_new_seed_products() -> usize as SyncRequest::SyncNewSeedProducts, Error = AdminError);
client_method!(SyncClient => fn publish_categories() -> Vec<Category> as SyncRequest::PublishCategories, Error = AdminError);
client_method!(SyncClient => fn force_import_seed() -> usize as SyncRequest::ForceImportSeed, Error = AdminError);
client_method!(SyncClient => fn reset_all() -> () as SyncRequest::ResetAll, Error = AdminError);
client_method!(SyncClient => fn check_session() -> () as SyncRequest::CheckSession, Error = AdminError);
client_method!(SyncClient => fn logout() -> () as SyncRequest::Logout, Error = AdminError);
