//! Catalog management: categories, brands and products.
//!
//! Every collection is an ordered JSON array under its own storage key. The
//! generic operations here allocate ids, run the [`Entity`] hooks and write the
//! whole collection back; a failing hook leaves the stored collection as it was.
//!
//! Products reference categories by slug and brands by name. Deleting or
//! renaming either side never rewrites products: lookups that miss resolve to
//! [`UNKNOWN_LABEL`].

mod brand;
mod category;
mod entity;
mod error;
mod product;

pub use entity::{next_id, Entity, EntityKind};
pub use error::CatalogError;

use tracing::{debug, info};

use crate::domain::{Brand, Category, Product};
use crate::store::{KeyValueStore, Repository};

pub const UNKNOWN_LABEL: &str = "unknown";

pub fn list<T: Entity, S: KeyValueStore>(repo: &Repository<S>) -> Result<Vec<T>, CatalogError> {
    Ok(repo.collection(T::KIND.storage_key())?)
}

pub fn get<T: Entity, S: KeyValueStore>(repo: &Repository<S>, id: u64) -> Result<Option<T>, CatalogError> {
    Ok(list::<T, S>(repo)?.into_iter().find(|item| item.id() == id))
}

pub fn create<T: Entity, S: KeyValueStore>(
    repo: &mut Repository<S>,
    payload: T::CreatePayload,
) -> Result<T, CatalogError> {
    let mut items = list::<T, S>(repo)?;
    let id = next_id(&items);
    let item = T::from_create(id, payload)?;
    item.check_unique(&items)?;

    items.push(item.clone());
    repo.write(T::KIND.storage_key(), &items)?;
    info!(kind = %T::KIND, id, "created");
    Ok(item)
}

pub fn update<T: Entity, S: KeyValueStore>(
    repo: &mut Repository<S>,
    id: u64,
    patch: T::Patch,
) -> Result<T, CatalogError> {
    let mut items = list::<T, S>(repo)?;
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or(CatalogError::NotFound { kind: T::KIND, id })?;

    let mut updated = items[index].clone();
    updated.on_update(patch)?;
    let others: Vec<T> = items.iter().filter(|item| item.id() != id).cloned().collect();
    updated.check_unique(&others)?;

    items[index] = updated.clone();
    repo.write(T::KIND.storage_key(), &items)?;
    info!(kind = %T::KIND, id, "updated");
    Ok(updated)
}

/// Hard delete. References held by other collections are left as they are.
pub fn delete<T: Entity, S: KeyValueStore>(repo: &mut Repository<S>, id: u64) -> Result<T, CatalogError> {
    let mut items = list::<T, S>(repo)?;
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or(CatalogError::NotFound { kind: T::KIND, id })?;

    let removed = items.remove(index);
    repo.write(T::KIND.storage_key(), &items)?;
    info!(kind = %T::KIND, id, "deleted");
    Ok(removed)
}

/// Name of the category a product points at, or [`UNKNOWN_LABEL`] when orphaned.
pub fn category_label<'a>(categories: &'a [Category], product: &Product) -> &'a str {
    match categories.iter().find(|category| category.value == product.category) {
        Some(category) => &category.name,
        None => {
            debug!(product_id = product.id, category = %product.category, "orphaned category reference");
            UNKNOWN_LABEL
        }
    }
}

/// The brand a product points at, or [`UNKNOWN_LABEL`] when orphaned or unset.
pub fn brand_label<'a>(brands: &'a [Brand], product: &Product) -> &'a str {
    match brands.iter().find(|brand| brand.name == product.brand) {
        Some(brand) => &brand.name,
        None => {
            debug!(product_id = product.id, brand = %product.brand, "orphaned brand reference");
            UNKNOWN_LABEL
        }
    }
}
