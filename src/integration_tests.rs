#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, Utc};
    use tokio::sync::broadcast::error::TryRecvError;

    use crate::app_system::AdminSystem;
    use crate::catalog::CatalogError;
    use crate::clients::{OrderClient, StatsClient, SyncClient};
    use crate::config::AdminConfig;
    use crate::domain::{
        Category, CategoryCreate, Order, OrderBook, OrderItem, OrderStatus, Product, ProductCreate, ProductPatch, User,
    };
    use crate::error::AdminError;
    use crate::events::AdminEvent;
    use crate::messages::{OrderRequest, StatsRequest, SyncRequest};
    use crate::mock_framework::{create_mock_sender, expect_order, expect_stats, expect_sync};
    use crate::orders::{OrderError, OrderSelection};
    use crate::store::{keys, JsonFileStorage, MemoryStorage, Repository};
    use crate::sync::SeedCatalog;

    fn seed() -> SeedCatalog {
        SeedCatalog {
            categories: vec![Category::new(1, "Rice", "rice"), Category::new(2, "Pulses", "pulses")],
            brands: Vec::new(),
            products: vec![
                Product::new(1, "Organic ST25 rice", "rice", 50_000, 100),
                Product::new(2, "Organic mung beans", "pulses", 30_000, 50),
            ],
        }
    }

    fn viewer_now() -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&FixedOffset::east_opt(7 * 3600).unwrap())
    }

    /// A store holding two customers' orders placed today.
    fn store_with_orders() -> MemoryStorage {
        let now = Utc::now();
        let mut book = OrderBook::new();
        book.insert(
            "alice".to_string(),
            vec![
                Order::new("o1", now, OrderStatus::Pending, vec![OrderItem::new("Organic ST25 rice", 50_000, 2)]),
                Order::new("o2", now, OrderStatus::Completed, vec![OrderItem::new("Organic mung beans", 30_000, 1)]),
            ],
        );
        book.insert(
            "bob".to_string(),
            vec![Order::new("o3", now, OrderStatus::Processing, vec![OrderItem::new("Organic mung beans", 30_000, 3)])],
        );

        let mut repo = Repository::new(MemoryStorage::new());
        repo.save_orders(&book).unwrap();
        repo.save_users(&[User::new("alice", "Alice", "customer"), User::new("bob", "Bob", "customer")])
            .unwrap();
        repo.into_storage()
    }

    // -------------------------------------------------------------------------
    // Clients against a mocked mailbox
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_bulk_update_is_a_single_request() {
        let (sender, mut receiver) = create_mock_sender(10);
        let order_client = OrderClient::new(sender);

        let task = tokio::spawn(async move {
            let selections = vec![OrderSelection::new("o1", "alice"), OrderSelection::new("o3", "bob")];
            order_client.bulk_set_order_status(selections, OrderStatus::Shipped).await
        });

        match expect_order(&mut receiver).await.expect("Expected order request") {
            OrderRequest::BulkSetStatus {
                selections,
                status,
                respond_to,
            } => {
                assert_eq!(selections.len(), 2);
                assert_eq!(status, OrderStatus::Shipped);
                respond_to.send(Ok(2)).unwrap();
            }
            other => panic!("Unexpected request: {:?}", other),
        }

        assert_eq!(task.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_status_name_never_reaches_the_service() {
        let (sender, mut receiver) = create_mock_sender(10);
        let order_client = OrderClient::new(sender);

        let result = order_client
            .set_order_status_named("o1".into(), "alice".into(), "refunded")
            .await;
        assert!(matches!(result, Err(OrderError::Validation(_))));
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stats_and_sync_clients_forward_requests() {
        let (sender, mut receiver) = create_mock_sender(10);
        let stats = StatsClient::new(sender.clone());
        let sync = SyncClient::new(sender);

        let report_task = tokio::spawn(async move { stats.snapshot().await });
        match expect_stats(&mut receiver).await.expect("Expected stats request") {
            StatsRequest::Snapshot { respond_to } => respond_to.send(Ok(Default::default())).unwrap(),
            other => panic!("Unexpected request: {:?}", other),
        }
        assert!(report_task.await.unwrap().unwrap().products.is_empty());

        let reset_task = tokio::spawn(async move { sync.reset_all().await });
        match expect_sync(&mut receiver).await.expect("Expected sync request") {
            SyncRequest::ResetAll { respond_to } => respond_to.send(Err(AdminError::SessionMissing)).unwrap(),
            other => panic!("Unexpected request: {:?}", other),
        }
        assert!(matches!(reset_task.await.unwrap(), Err(AdminError::SessionMissing)));
    }

    // -------------------------------------------------------------------------
    // Full system
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_completing_an_order_updates_the_dashboard() {
        let system = AdminSystem::start(store_with_orders(), seed(), &AdminConfig::default()).unwrap();
        let mut events = system.subscribe();

        let before = system.stats.report_at(viewer_now()).await.unwrap();
        let previous = system
            .orders
            .set_order_status("o1".into(), "alice".into(), OrderStatus::Completed)
            .await
            .unwrap();
        let after = system.stats.report_at(viewer_now()).await.unwrap();

        assert_eq!(previous, OrderStatus::Pending);
        assert_eq!(after.summary.total_revenue, before.summary.total_revenue + 100_000);
        assert_eq!(after.summary.pending_orders + 1, before.summary.pending_orders);
        assert_eq!(after.summary.completed_orders, before.summary.completed_orders + 1);

        match events.recv().await.unwrap() {
            AdminEvent::OrderStatusUpdated {
                order_id,
                username,
                status,
                ..
            } => {
                assert_eq!((order_id.as_str(), username.as_str()), ("o1", "alice"));
                assert_eq!(status, OrderStatus::Completed);
            }
            other => panic!("Unexpected event: {:?}", other),
        }
        assert_eq!(events.recv().await.unwrap(), AdminEvent::DashboardInvalidated);

        let history = system.orders.order_history("alice".into()).await.unwrap();
        assert!(history.iter().any(|o| o.id == "o1" && o.updated_at.is_some()));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_bulk_update_skips_unknown_orders() {
        let system = AdminSystem::start(store_with_orders(), seed(), &AdminConfig::default()).unwrap();

        let updated = system
            .orders
            .bulk_set_order_status(
                vec![
                    OrderSelection::new("o1", "alice"),
                    OrderSelection::new("o3", "bob"),
                    OrderSelection::new("o9", "carol"),
                ],
                OrderStatus::Cancelled,
            )
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let views = system.orders.list_orders().await.unwrap();
        let cancelled: Vec<_> = views
            .iter()
            .filter(|v| v.order.status == OrderStatus::Cancelled)
            .map(|v| v.order.id.as_str())
            .collect();
        assert_eq!(cancelled, vec!["o1", "o3"]);

        let missing = system
            .orders
            .set_order_status("o9".into(), "alice".into(), OrderStatus::Completed)
            .await;
        assert!(matches!(missing, Err(OrderError::NotFound { .. })));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_category_changes_reach_the_storefront() {
        let system = AdminSystem::start(MemoryStorage::new(), seed(), &AdminConfig::default()).unwrap();
        let mut events = system.subscribe();

        let created = system
            .categories
            .create_category(CategoryCreate {
                name: "Fresh Vegetables".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(created.value, "fresh-vegetables");

        let duplicate = system
            .categories
            .create_category(CategoryCreate {
                name: "fresh  vegetables".into(),
            })
            .await;
        assert!(matches!(duplicate, Err(CatalogError::Validation { field: "value", .. })));

        assert!(matches!(events.recv().await.unwrap(), AdminEvent::CatalogChanged { .. }));
        match events.recv().await.unwrap() {
            AdminEvent::CategoriesPublished(categories) => assert_eq!(categories.len(), 3),
            other => panic!("Unexpected event: {:?}", other),
        }
        assert_eq!(events.recv().await.unwrap(), AdminEvent::DashboardInvalidated);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_product_lifecycle_and_orphans() {
        let system = AdminSystem::start(MemoryStorage::new(), seed(), &AdminConfig::default()).unwrap();

        let product = system
            .products
            .create_product(ProductCreate {
                title: "Red lentils".into(),
                category: "pulses".into(),
                price: 42_000,
                stock: 3,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(product.id, 3);
        assert_eq!(product.images, vec![product.thumbnail.clone()]);

        let rejected = system
            .products
            .update_product(
                3,
                ProductPatch {
                    stock: Some(-1),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(rejected, Err(CatalogError::Validation { field: "stock", .. })));

        system.categories.delete_category(2).await.unwrap();
        let snapshot = system.stats.snapshot().await.unwrap();
        let orphan = snapshot.products.iter().find(|p| p.id == 3).unwrap();
        assert_eq!(orphan.category, "pulses");
        assert_eq!(orphan.stock, 3);
        assert_eq!(
            crate::catalog::category_label(&snapshot.categories, orphan),
            crate::catalog::UNKNOWN_LABEL
        );

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let system = AdminSystem::start(JsonFileStorage::open(&path).unwrap(), seed(), &AdminConfig::default()).unwrap();
        assert_eq!(system.products.list_products().await.unwrap().len(), 2);
        system.sync.reset_all().await.unwrap();
        assert_eq!(system.sync.sync_new_seed_products().await.unwrap(), 0);
        system.shutdown().await.unwrap();

        let restarted =
            AdminSystem::start(JsonFileStorage::open(&path).unwrap(), seed(), &AdminConfig::default()).unwrap();
        assert!(restarted.products.list_products().await.unwrap().is_empty());
        assert!(restarted.categories.list_categories().await.unwrap().is_empty());

        assert_eq!(restarted.sync.force_import_seed().await.unwrap(), 2);
        assert_eq!(restarted.products.list_products().await.unwrap().len(), 2);
        restarted.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_required_session() {
        let config = AdminConfig {
            require_session: true,
            ..Default::default()
        };
        let refused = AdminSystem::start(MemoryStorage::new(), seed(), &config);
        assert!(matches!(refused, Err(AdminError::SessionMissing)));

        let mut repo = Repository::new(MemoryStorage::new());
        repo.write(keys::ADMIN_SESSION, &serde_json::json!({ "username": "admin" }))
            .unwrap();
        let system = AdminSystem::start(repo.into_storage(), seed(), &config).unwrap();
        system.sync.check_session().await.unwrap();
        system.sync.logout().await.unwrap();
        assert!(matches!(system.sync.check_session().await, Err(AdminError::SessionMissing)));
        system.shutdown().await.unwrap();
    }
}
