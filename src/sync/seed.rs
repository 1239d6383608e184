use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Brand, Category, Product};
use crate::store::StoreError;

/// The static catalog shipped with the storefront.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl SeedCatalog {
    /// Load a seed catalog from a JSON file with optional `categories`,
    /// `brands` and `products` arrays.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let seed: SeedCatalog = serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            key: path.display().to_string(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            categories = seed.categories.len(),
            brands = seed.brands.len(),
            products = seed.products.len(),
            "loaded seed catalog"
        );
        Ok(seed)
    }

    /// Small built-in catalog used when no seed file is configured.
    pub fn builtin() -> Self {
        let categories = [
            "Nutritious cereals",
            "Pulses",
            "Spices and Condiments",
            "Cooking oils",
            "Rice",
            "Flours & Meals",
            "Fresh Vegetables",
        ]
        .into_iter()
        .zip(1..)
        .map(|(value, id)| Category::new(id, value, value))
        .collect();

        let brands = vec![
            Brand::new(1, "Cascadian Farm", "Premium organic food brand"),
            Brand::new(2, "Great Value", "Good value brand"),
            Brand::new(3, "Organic Valley", "High quality organic products"),
            Brand::new(4, "Star Organic", "The farm's own brand"),
            Brand::new(5, "Nature's Path", "Natural organic food"),
        ];

        let products = vec![
            seed_product(1, "Organic ST25 rice", "Rice", 50_000, 55_000, 100, "Star Organic", "./data/products/30/thumbnail.jpg", 4.5),
            seed_product(2, "Organic mung beans", "Pulses", 30_000, 35_000, 50, "Organic Valley", "./data/products/2/thumbnail.webp", 4.0),
            seed_product(3, "Organic spice mix", "Spices and Condiments", 25_000, 30_000, 75, "Great Value", "./data/products/4/3.jpeg", 4.2),
        ];

        Self {
            categories,
            brands,
            products,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_product(
    id: u64,
    title: &str,
    category: &str,
    price: u64,
    reference_price: u64,
    stock: u32,
    brand: &str,
    thumbnail: &str,
    rating: f64,
) -> Product {
    Product {
        reference_price: Some(reference_price),
        thumbnail: thumbnail.to_string(),
        images: vec![thumbnail.to_string()],
        rating,
        ..Product::new(id, title, category, price, stock).with_brand(brand)
    }
}
