use chrono::{DateTime, FixedOffset};
use tokio::sync::oneshot;

use crate::actor_framework::{ResourceRequest, Routable};
use crate::domain::{Brand, Category, Order, OrderStatus, Product};
use crate::error::AdminError;
use crate::orders::{OrderError, OrderSelection, OrderView};
use crate::stats::{DashboardReport, Snapshot};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Everything the admin service accepts. Each concern has its own typed
/// request enum; every variant carries a oneshot channel for the reply.
#[derive(Debug)]
pub enum AdminRequest {
    Category(ResourceRequest<Category>),
    Brand(ResourceRequest<Brand>),
    Product(ResourceRequest<Product>),
    Order(OrderRequest),
    Stats(StatsRequest),
    Sync(SyncRequest),
    Shutdown,
}

#[derive(Debug)]
pub enum OrderRequest {
    SetStatus {
        order_id: String,
        username: String,
        status: OrderStatus,
        respond_to: ServiceResponse<OrderStatus, OrderError>,
    },
    BulkSetStatus {
        selections: Vec<OrderSelection>,
        status: OrderStatus,
        respond_to: ServiceResponse<usize, OrderError>,
    },
    History {
        username: String,
        respond_to: ServiceResponse<Vec<Order>, OrderError>,
    },
    List {
        respond_to: ServiceResponse<Vec<OrderView>, OrderError>,
    },
}

#[derive(Debug)]
pub enum StatsRequest {
    Snapshot {
        respond_to: ServiceResponse<Snapshot, AdminError>,
    },
    Report {
        now: DateTime<FixedOffset>,
        respond_to: ServiceResponse<DashboardReport, AdminError>,
    },
}

#[derive(Debug)]
pub enum SyncRequest {
    SyncNewSeedProducts {
        respond_to: ServiceResponse<usize, AdminError>,
    },
    PublishCategories {
        respond_to: ServiceResponse<Vec<Category>, AdminError>,
    },
    ForceImportSeed {
        respond_to: ServiceResponse<usize, AdminError>,
    },
    ResetAll {
        respond_to: ServiceResponse<(), AdminError>,
    },
    CheckSession {
        respond_to: ServiceResponse<(), AdminError>,
    },
    Logout {
        respond_to: ServiceResponse<(), AdminError>,
    },
}

impl From<OrderRequest> for AdminRequest {
    fn from(request: OrderRequest) -> Self {
        AdminRequest::Order(request)
    }
}

impl From<StatsRequest> for AdminRequest {
    fn from(request: StatsRequest) -> Self {
        AdminRequest::Stats(request)
    }
}

impl From<SyncRequest> for AdminRequest {
    fn from(request: SyncRequest) -> Self {
        AdminRequest::Sync(request)
    }
}

macro_rules! routable {
    ($entity:ty => $variant:ident) => {
        impl Routable for $entity {
            fn route(request: ResourceRequest<Self>) -> AdminRequest {
                AdminRequest::$variant(request)
            }

            fn unroute(request: AdminRequest) -> Option<ResourceRequest<Self>> {
                match request {
                    AdminRequest::$variant(request) => Some(request),
                    _ => None,
                }
            }
        }
    };
}

routable!(Category => Category);
routable!(Brand => Brand);
routable!(Product => Product);
