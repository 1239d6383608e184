use tokio::sync::{mpsc, oneshot};

use crate::catalog::{CatalogError, Entity};
use crate::messages::AdminRequest;

// =============================================================================
// 1. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

/// CRUD request for one catalog collection.
#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T, CatalogError>,
    },
    Get {
        id: u64,
        respond_to: Response<Option<T>, CatalogError>,
    },
    List {
        respond_to: Response<Vec<T>, CatalogError>,
    },
    Update {
        id: u64,
        patch: T::Patch,
        respond_to: Response<T, CatalogError>,
    },
    Delete {
        id: u64,
        respond_to: Response<T, CatalogError>,
    },
}

/// Catalog records that travel through the admin mailbox.
///
/// All collections share one mailbox so requests are served strictly one at a
/// time; `route` wraps a typed request into the mailbox envelope and `unroute`
/// takes it back out.
pub trait Routable: Entity {
    fn route(request: ResourceRequest<Self>) -> AdminRequest;
    fn unroute(request: AdminRequest) -> Option<ResourceRequest<Self>>;
}

// =============================================================================
// 2. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Routable> {
    sender: mpsc::Sender<AdminRequest>,
    _entity: std::marker::PhantomData<fn() -> T>,
}

impl<T: Routable> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self::new(self.sender.clone())
    }
}

impl<T: Routable> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<AdminRequest>) -> Self {
        Self {
            sender,
            _entity: std::marker::PhantomData,
        }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, CatalogError>) -> ResourceRequest<T>,
    ) -> Result<R, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(T::route(build(respond_to)))
            .await
            .map_err(|_| CatalogError::ActorCommunication("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| CatalogError::ActorCommunication("Actor dropped".to_string()))?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, CatalogError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: u64) -> Result<Option<T>, CatalogError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, CatalogError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: u64, patch: T::Patch) -> Result<T, CatalogError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: u64) -> Result<T, CatalogError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }
}

// =============================================================================
// 3. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::AdminService;
    use crate::domain::{Brand, BrandCreate, BrandPatch};
    use crate::events::EventBus;
    use crate::panel::AdminPanel;
    use crate::store::MemoryStorage;
    use crate::sync::{InitMode, SeedCatalog};

    #[tokio::test]
    async fn test_resource_client_against_service() {
        let panel = AdminPanel::with_mode(
            MemoryStorage::new(),
            SeedCatalog::default(),
            EventBus::default(),
            InitMode::Seed,
        )
        .unwrap();
        let (service, sender) = AdminService::new(10, panel);
        let handle = tokio::spawn(service.run());
        let client = ResourceClient::<Brand>::new(sender.clone());

        // 1. Create
        let brand = client
            .create(BrandCreate {
                name: "Great Value".into(),
                description: "Everyday prices".into(),
            })
            .await
            .unwrap();
        assert_eq!(brand.id, 1);

        // 2. Update
        let updated = client
            .update(1, BrandPatch {
                description: Some("Good value brand".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Great Value");

        // 3. Missing ids are errors, not silent no-ops
        let missing = client.delete(42).await;
        assert!(matches!(missing, Err(CatalogError::NotFound { id: 42, .. })));

        // 4. Verify state
        assert_eq!(client.list().await.unwrap(), vec![updated]);

        sender.send(AdminRequest::Shutdown).await.unwrap();
        handle.await.unwrap();

        let closed = client.get(1).await;
        assert!(matches!(closed, Err(CatalogError::ActorCommunication(_))));
    }
}
