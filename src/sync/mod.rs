//! Reconciliation between the shipped seed catalog, the admin collections and
//! the storefront's published copies.

mod seed;

pub use seed::SeedCatalog;

use std::collections::HashSet;

use tracing::info;

use crate::domain::Category;
use crate::store::{keys, KeyValueStore, Repository, StoreError};

/// How startup treats empty collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// Fill absent collections from the seed catalog.
    Seed,
    /// Leave everything as found; set after an explicit data reset.
    Suppressed,
}

impl InitMode {
    pub fn from_suppressed(suppressed: bool) -> Self {
        if suppressed {
            InitMode::Suppressed
        } else {
            InitMode::Seed
        }
    }
}

/// What [`initialize`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitReport {
    pub categories_seeded: bool,
    pub brands_seeded: bool,
    pub products_seeded: usize,
}

/// Seed absent categories and brands, and an absent or empty product list.
pub fn initialize<S: KeyValueStore>(
    repo: &mut Repository<S>,
    mode: InitMode,
    seed: &SeedCatalog,
) -> Result<InitReport, StoreError> {
    let mut report = InitReport::default();
    if mode == InitMode::Suppressed {
        info!("Seeding suppressed by data reset");
        return Ok(report);
    }

    if !repo.contains(keys::CATEGORIES)? {
        repo.write(keys::CATEGORIES, &seed.categories)?;
        report.categories_seeded = true;
    }
    if !repo.contains(keys::BRANDS)? {
        repo.write(keys::BRANDS, &seed.brands)?;
        report.brands_seeded = true;
    }
    if repo.products()?.is_empty() {
        repo.save_products(&seed.products)?;
        report.products_seeded = seed.products.len();
    }

    info!(
        categories = report.categories_seeded,
        brands = report.brands_seeded,
        products = report.products_seeded,
        "Admin data initialized"
    );
    Ok(report)
}

/// Append seed products whose id the admin catalog lacks. Existing records,
/// edited or not, are never replaced.
pub fn sync_new_seed_products<S: KeyValueStore>(
    repo: &mut Repository<S>,
    seed: &SeedCatalog,
) -> Result<usize, StoreError> {
    let mut products = repo.products()?;
    let known: HashSet<u64> = products.iter().map(|p| p.id).collect();
    let missing: Vec<_> = seed
        .products
        .iter()
        .filter(|p| !known.contains(&p.id))
        .cloned()
        .collect();

    if missing.is_empty() {
        return Ok(0);
    }
    let added = missing.len();
    products.extend(missing);
    repo.save_products(&products)?;
    info!(added, "Synced new seed products");
    Ok(added)
}

/// Copy the categories into the storefront's snapshot key.
pub fn publish_categories<S: KeyValueStore>(repo: &mut Repository<S>) -> Result<Vec<Category>, StoreError> {
    let categories = repo.categories()?;
    repo.write(keys::WEBSITE_CATEGORIES, &categories)?;
    info!(count = categories.len(), "Website categories updated");
    Ok(categories)
}

/// Replace the admin and storefront product lists with the seed products.
pub fn force_import<S: KeyValueStore>(repo: &mut Repository<S>, seed: &SeedCatalog) -> Result<usize, StoreError> {
    let products: Vec<_> = seed
        .products
        .iter()
        .cloned()
        .map(|mut product| {
            if product.images.is_empty() && !product.thumbnail.is_empty() {
                product.images = vec![product.thumbnail.clone()];
            }
            product
        })
        .collect();

    repo.save_products(&products)?;
    repo.write(keys::WEBSITE_PRODUCTS, &products)?;
    info!(count = products.len(), "Imported seed products");
    Ok(products.len())
}

/// Clear every admin and storefront collection and remember not to reseed.
pub fn reset_all<S: KeyValueStore>(repo: &mut Repository<S>) -> Result<(), StoreError> {
    repo.set_sample_data_suppressed(true)?;
    for key in [
        keys::CATEGORIES,
        keys::BRANDS,
        keys::ADMIN_PRODUCTS,
        keys::WEBSITE_CATEGORIES,
        keys::WEBSITE_PRODUCTS,
        keys::ORDERS,
        keys::USERS,
    ] {
        repo.remove(key)?;
    }
    info!("Admin data reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use crate::store::MemoryStorage;

    fn seed() -> SeedCatalog {
        SeedCatalog {
            categories: vec![Category::new(1, "Rice", "rice")],
            brands: Vec::new(),
            products: vec![
                Product::new(1, "A", "rice", 10, 1),
                Product::new(2, "B", "rice", 20, 2),
                Product::new(3, "C", "rice", 30, 3),
            ],
        }
    }

    #[test]
    fn test_initialize_copies_seed_verbatim() {
        let mut repo = Repository::new(MemoryStorage::new());
        let report = initialize(&mut repo, InitMode::Seed, &seed()).unwrap();

        assert_eq!(report.products_seeded, 3);
        assert!(report.categories_seeded);
        assert_eq!(repo.products().unwrap(), seed().products);
        assert_eq!(repo.categories().unwrap(), seed().categories);
        assert!(repo.contains(keys::BRANDS).unwrap());
    }

    #[test]
    fn test_initialize_keeps_existing_and_reseeds_empty_products() {
        let mut repo = Repository::new(MemoryStorage::new());
        repo.write(keys::CATEGORIES, &Vec::<Category>::new()).unwrap();
        repo.save_products(&[]).unwrap();

        let report = initialize(&mut repo, InitMode::Seed, &seed()).unwrap();
        assert!(!report.categories_seeded);
        assert!(repo.categories().unwrap().is_empty());
        assert_eq!(report.products_seeded, 3);
    }

    #[test]
    fn test_suppressed_initialize_writes_nothing() {
        let mut repo = Repository::new(MemoryStorage::new());
        let report = initialize(&mut repo, InitMode::Suppressed, &seed()).unwrap();
        assert_eq!(report, InitReport::default());
        assert!(repo.storage().keys().is_empty());
    }

    #[test]
    fn test_sync_is_additive_and_idempotent() {
        let mut repo = Repository::new(MemoryStorage::new());
        let mut edited = Product::new(2, "B (edited)", "rice", 25, 0);
        edited.description = "admin copy".into();
        repo.save_products(&[edited.clone()]).unwrap();

        assert_eq!(sync_new_seed_products(&mut repo, &seed()).unwrap(), 2);
        let once = repo.products().unwrap();
        assert_eq!(sync_new_seed_products(&mut repo, &seed()).unwrap(), 0);
        let twice = repo.products().unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
        assert_eq!(once[0], edited);
        let ids: Vec<u64> = once.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_publish_is_a_snapshot() {
        let mut repo = Repository::new(MemoryStorage::new());
        repo.write(keys::CATEGORIES, &seed().categories).unwrap();
        publish_categories(&mut repo).unwrap();

        repo.write(keys::CATEGORIES, &Vec::<Category>::new()).unwrap();
        assert_eq!(repo.website_categories().unwrap(), seed().categories);
    }

    #[test]
    fn test_reset_clears_and_sets_flag() {
        let mut repo = Repository::new(MemoryStorage::new());
        initialize(&mut repo, InitMode::Seed, &seed()).unwrap();
        publish_categories(&mut repo).unwrap();

        reset_all(&mut repo).unwrap();
        assert!(repo.sample_data_suppressed().unwrap());
        assert_eq!(repo.storage().keys(), vec![keys::PREVENT_SAMPLE_DATA.to_string()]);
    }

    #[test]
    fn test_force_import_overwrites_admin_products() {
        let mut repo = Repository::new(MemoryStorage::new());
        repo.save_products(&[Product::new(9, "Z", "x", 1, 1)]).unwrap();
        let mut seed = seed();
        seed.products[0].thumbnail = "a.jpg".into();

        assert_eq!(force_import(&mut repo, &seed).unwrap(), 3);
        let products = repo.products().unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].images, vec!["a.jpg".to_string()]);
        assert!(repo.contains(keys::WEBSITE_PRODUCTS).unwrap());
    }
}
