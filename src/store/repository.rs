use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Brand, Category, OrderBook, Product, User};

use super::error::{Result, StoreError};
use super::keys;
use super::storage::KeyValueStore;

/// Typed JSON documents over a [`KeyValueStore`].
///
/// Absent collections read as empty. Every write goes straight to the backing
/// storage.
pub struct Repository<S> {
    storage: S,
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        self.storage.contains(key)
    }

    /// Decode the document under `key`, or `None` when the key is absent.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.storage.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Malformed {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        tracing::trace!(key, bytes = encoded.len(), "writing document");
        self.storage.set(key, encoded)
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.storage.remove(key)
    }

    /// Read a sequence collection, treating an absent key as empty.
    pub fn collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        self.collection(keys::CATEGORIES)
    }

    pub fn brands(&self) -> Result<Vec<Brand>> {
        self.collection(keys::BRANDS)
    }

    pub fn products(&self) -> Result<Vec<Product>> {
        self.collection(keys::ADMIN_PRODUCTS)
    }

    pub fn save_products(&mut self, products: &[Product]) -> Result<()> {
        self.write(keys::ADMIN_PRODUCTS, products)
    }

    pub fn users(&self) -> Result<Vec<User>> {
        self.collection(keys::USERS)
    }

    pub fn save_users(&mut self, users: &[User]) -> Result<()> {
        self.write(keys::USERS, users)
    }

    pub fn orders(&self) -> Result<OrderBook> {
        Ok(self.read(keys::ORDERS)?.unwrap_or_default())
    }

    pub fn save_orders(&mut self, orders: &OrderBook) -> Result<()> {
        self.write(keys::ORDERS, orders)
    }

    pub fn website_categories(&self) -> Result<Vec<Category>> {
        self.collection(keys::WEBSITE_CATEGORIES)
    }

    /// True once a data reset has asked startup not to reseed.
    pub fn sample_data_suppressed(&self) -> Result<bool> {
        Ok(self.storage.get(keys::PREVENT_SAMPLE_DATA)?.as_deref() == Some("true"))
    }

    pub fn set_sample_data_suppressed(&mut self, suppressed: bool) -> Result<()> {
        if suppressed {
            self.storage.set(keys::PREVENT_SAMPLE_DATA, "true".to_string())
        } else {
            self.storage.remove(keys::PREVENT_SAMPLE_DATA)
        }
    }

    pub fn admin_session_present(&self) -> Result<bool> {
        self.storage.contains(keys::ADMIN_SESSION)
    }

    /// Drop both the admin and the storefront session.
    pub fn clear_sessions(&mut self) -> Result<()> {
        self.storage.remove(keys::ADMIN_SESSION)?;
        self.storage.remove(keys::CURRENT_USER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderItem, OrderStatus};
    use crate::store::MemoryStorage;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_absent_collections_read_empty() {
        let repo = Repository::new(MemoryStorage::new());
        assert!(repo.categories().unwrap().is_empty());
        assert!(repo.orders().unwrap().is_empty());
        assert!(!repo.sample_data_suppressed().unwrap());
    }

    #[test]
    fn test_orders_round_trip_by_username() {
        let mut repo = Repository::new(MemoryStorage::new());
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut book = OrderBook::new();
        book.insert(
            "alice".to_string(),
            vec![Order::new("o1", date, OrderStatus::Pending, vec![OrderItem::new("Rice", 10, 1)])],
        );
        repo.save_orders(&book).unwrap();

        let loaded = repo.orders().unwrap();
        assert_eq!(loaded, book);
        assert!(repo.contains(keys::ORDERS).unwrap());
    }

    #[test]
    fn test_malformed_document_names_key() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::BRANDS, "{not json".to_string()).unwrap();
        let repo = Repository::new(storage);

        match repo.brands() {
            Err(StoreError::Malformed { key, .. }) => assert_eq!(key, keys::BRANDS),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_suppression_flag_toggles() {
        let mut repo = Repository::new(MemoryStorage::new());
        repo.set_sample_data_suppressed(true).unwrap();
        assert!(repo.sample_data_suppressed().unwrap());
        repo.set_sample_data_suppressed(false).unwrap();
        assert!(!repo.sample_data_suppressed().unwrap());
    }
}
