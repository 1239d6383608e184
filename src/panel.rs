//! The admin panel core.
//!
//! [`AdminPanel`] ties the repository, the catalog and order managers, the
//! aggregator and the sync bridge together. Every method runs to completion
//! against the store before returning, and successful mutations announce
//! themselves on the [`EventBus`].

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{info, warn};

use crate::catalog::{self, CatalogError, Entity, EntityKind};
use crate::domain::{Category, Order, OrderStatus};
use crate::error::AdminError;
use crate::events::{AdminEvent, EventBus};
use crate::orders::{self, OrderError, OrderSelection, OrderView, StatusChange};
use crate::stats::{Aggregator, DashboardReport, Snapshot};
use crate::store::{KeyValueStore, Repository, StoreError};
use crate::sync::{self, InitMode, SeedCatalog};

pub struct AdminPanel<S> {
    repo: Repository<S>,
    seed: SeedCatalog,
    events: EventBus,
    mode: InitMode,
}

impl<S: KeyValueStore> AdminPanel<S> {
    /// Open the panel, choosing the init mode from the persisted reset flag.
    pub fn open(storage: S, seed: SeedCatalog, events: EventBus) -> Result<Self, AdminError> {
        let repo = Repository::new(storage);
        let mode = InitMode::from_suppressed(repo.sample_data_suppressed()?);
        Self::start(repo, seed, events, mode)
    }

    /// Open the panel with an explicit init mode; the persisted flag is ignored.
    pub fn with_mode(storage: S, seed: SeedCatalog, events: EventBus, mode: InitMode) -> Result<Self, AdminError> {
        Self::start(Repository::new(storage), seed, events, mode)
    }

    fn start(mut repo: Repository<S>, seed: SeedCatalog, events: EventBus, mode: InitMode) -> Result<Self, AdminError> {
        sync::initialize(&mut repo, mode, &seed)?;
        let mut panel = Self {
            repo,
            seed,
            events,
            mode,
        };
        panel.sync_new_seed_products()?;
        if panel.repo.contains(crate::store::keys::CATEGORIES)? {
            panel.publish_categories()?;
        }
        info!(?mode, "Admin panel ready");
        Ok(panel)
    }

    pub fn mode(&self) -> InitMode {
        self.mode
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }

    pub fn into_storage(self) -> S {
        self.repo.into_storage()
    }

    // --- Catalog ---

    pub fn list<T: Entity>(&self) -> Result<Vec<T>, CatalogError> {
        catalog::list::<T, S>(&self.repo)
    }

    pub fn get<T: Entity>(&self, id: u64) -> Result<Option<T>, CatalogError> {
        catalog::get::<T, S>(&self.repo, id)
    }

    pub fn create<T: Entity>(&mut self, payload: T::CreatePayload) -> Result<T, CatalogError> {
        let item = catalog::create::<T, S>(&mut self.repo, payload)?;
        self.catalog_changed(T::KIND);
        Ok(item)
    }

    pub fn update<T: Entity>(&mut self, id: u64, patch: T::Patch) -> Result<T, CatalogError> {
        let item = catalog::update::<T, S>(&mut self.repo, id, patch)?;
        self.catalog_changed(T::KIND);
        Ok(item)
    }

    pub fn delete<T: Entity>(&mut self, id: u64) -> Result<T, CatalogError> {
        let item = catalog::delete::<T, S>(&mut self.repo, id)?;
        self.catalog_changed(T::KIND);
        Ok(item)
    }

    fn catalog_changed(&mut self, kind: EntityKind) {
        self.events.publish(AdminEvent::CatalogChanged { kind });
        if kind == EntityKind::Category {
            if let Err(e) = self.publish_categories() {
                warn!(error = %e, "Could not republish categories");
            }
        }
        self.events.publish(AdminEvent::DashboardInvalidated);
    }

    // --- Orders ---

    /// Set one order's status, returning the status it had before.
    pub fn set_order_status(
        &mut self,
        order_id: &str,
        username: &str,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        let change = orders::set_order_status(&mut self.repo, order_id, username, status, Utc::now())?;
        self.status_changed(&change);
        self.events.publish(AdminEvent::DashboardInvalidated);
        Ok(change.previous)
    }

    /// Apply `status` to every selected order, returning how many changed.
    pub fn bulk_set_order_status(&mut self, selections: &[OrderSelection], status: OrderStatus) -> usize {
        let changes = orders::bulk_set_order_status(&mut self.repo, selections, status, Utc::now());
        for change in &changes {
            self.status_changed(change);
        }
        if !changes.is_empty() {
            self.events.publish(AdminEvent::DashboardInvalidated);
        }
        changes.len()
    }

    fn status_changed(&self, change: &StatusChange) {
        self.events.publish(AdminEvent::OrderStatusUpdated {
            order_id: change.order_id.clone(),
            username: change.username.clone(),
            status: change.status,
            timestamp: change.at,
        });
    }

    pub fn order_history(&self, username: &str) -> Result<Vec<Order>, OrderError> {
        orders::order_history(&self.repo, username)
    }

    pub fn list_orders(&self) -> Result<Vec<OrderView>, OrderError> {
        orders::list_orders(&self.repo)
    }

    // --- Statistics ---

    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Snapshot::load(&self.repo)
    }

    /// Dashboard figures as seen at `now`, bucketed in `now`'s time zone.
    pub fn report_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Result<DashboardReport, StoreError> {
        let snapshot = self.snapshot()?;
        Ok(Aggregator::new(&snapshot, now).report())
    }

    pub fn report(&self) -> Result<DashboardReport, StoreError> {
        self.report_at(Local::now())
    }

    // --- Sync ---

    /// Merge seed products the admin catalog lacks. Does nothing after a reset.
    pub fn sync_new_seed_products(&mut self) -> Result<usize, StoreError> {
        if self.mode == InitMode::Suppressed {
            return Ok(0);
        }
        let added = sync::sync_new_seed_products(&mut self.repo, &self.seed)?;
        if added > 0 {
            self.events.publish(AdminEvent::CatalogChanged {
                kind: EntityKind::Product,
            });
            self.events.publish(AdminEvent::DashboardInvalidated);
        }
        Ok(added)
    }

    pub fn publish_categories(&mut self) -> Result<Vec<Category>, StoreError> {
        let categories = sync::publish_categories(&mut self.repo)?;
        self.events.publish(AdminEvent::CategoriesPublished(categories.clone()));
        Ok(categories)
    }

    pub fn force_import_seed(&mut self) -> Result<usize, StoreError> {
        let imported = sync::force_import(&mut self.repo, &self.seed)?;
        self.events.publish(AdminEvent::CatalogChanged {
            kind: EntityKind::Product,
        });
        self.events.publish(AdminEvent::DashboardInvalidated);
        Ok(imported)
    }

    /// Clear all data and stop reseeding, for this run and later ones.
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        sync::reset_all(&mut self.repo)?;
        self.mode = InitMode::Suppressed;
        self.events.publish(AdminEvent::DataReset);
        self.events.publish(AdminEvent::DashboardInvalidated);
        Ok(())
    }

    // --- Session ---

    pub fn require_session(&self) -> Result<(), AdminError> {
        if self.repo.admin_session_present()? {
            Ok(())
        } else {
            Err(AdminError::SessionMissing)
        }
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.repo.clear_sessions()?;
        info!("Admin logged out");
        Ok(())
    }
}
