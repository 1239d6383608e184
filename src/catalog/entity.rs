use std::fmt::{self, Debug, Display};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::keys;

use super::CatalogError;

/// The catalog collections managed through [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Category,
    Brand,
    Product,
}

impl EntityKind {
    pub fn storage_key(&self) -> &'static str {
        match self {
            EntityKind::Category => keys::CATEGORIES,
            EntityKind::Brand => keys::BRANDS,
            EntityKind::Product => keys::ADMIN_PRODUCTS,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Category => "Category",
            EntityKind::Brand => "Brand",
            EntityKind::Product => "Product",
        };
        f.write_str(name)
    }
}

/// Trait that any catalog record must implement to be managed generically.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    const KIND: EntityKind;

    /// Get the ID of the entity
    fn id(&self) -> u64;

    /// Construct the full record from the allocated ID and the payload
    fn from_create(id: u64, payload: Self::CreatePayload) -> Result<Self, CatalogError>;

    // --- Lifecycle Hooks ---

    /// Apply a patch. Must validate before mutating anything.
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), CatalogError>;

    /// Reject collisions on the join key. `others` never contains `self`.
    fn check_unique(&self, _others: &[Self]) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// `max(existing ids) + 1`, or `1` for an empty collection.
pub fn next_id<T: Entity>(items: &[T]) -> u64 {
    items.iter().map(Entity::id).max().map_or(1, |max| max + 1)
}

/// Trimmed, non-empty text or a validation failure on `field`.
pub(crate) fn required_text(field: &'static str, value: String) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CatalogError::validation(field, "must not be empty"))
    } else {
        Ok(trimmed.to_string())
    }
}
