use serde::{Deserialize, Serialize};

pub const DEFAULT_THUMBNAIL: &str = "./img/default-product.jpg";

/// A catalog entry.
///
/// `category` holds a `Category::value` and `brand` a `Brand::name`. Neither is
/// rewritten when the referenced record is renamed or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Price in minor currency units.
    pub price: u64,
    /// Stored under `discountPercentage`, but the value is a reference
    /// ("before discount") price, not a percentage.
    #[serde(rename = "discountPercentage", default)]
    pub reference_price: Option<u64>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Payload for creating a product, as entered in the admin form.
///
/// `price` and `stock` are signed so that out-of-range input can be reported
/// as a validation failure instead of being unrepresentable.
#[derive(Debug, Clone, Default)]
pub struct ProductCreate {
    pub title: String,
    pub category: String,
    pub price: i64,
    pub reference_price: Option<u64>,
    pub stock: i64,
    pub brand: String,
    pub thumbnail: String,
    pub description: String,
}

/// Partial update for a product. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub reference_price: Option<Option<u64>>,
    pub stock: Option<i64>,
    pub brand: Option<String>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
}

impl Product {
    pub fn new(id: u64, title: impl Into<String>, category: impl Into<String>, price: u64, stock: u32) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            price,
            reference_price: None,
            stock,
            brand: String::new(),
            thumbnail: String::new(),
            description: String::new(),
            rating: 0.0,
            images: Vec::new(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Value of the units on hand at list price.
    pub fn inventory_value(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.stock))
    }
}
