use crate::domain::{Product, ProductCreate, ProductPatch, DEFAULT_THUMBNAIL};

use super::entity::{required_text, Entity, EntityKind};
use super::CatalogError;

fn valid_price(price: i64) -> Result<u64, CatalogError> {
    u64::try_from(price)
        .ok()
        .filter(|price| *price > 0)
        .ok_or_else(|| CatalogError::validation("price", format!("must be a positive integer, got {price}")))
}

fn valid_stock(stock: i64) -> Result<u32, CatalogError> {
    u32::try_from(stock)
        .map_err(|_| CatalogError::validation("stock", format!("must be zero or more, got {stock}")))
}

impl Entity for Product {
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;

    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> u64 {
        self.id
    }

    /// Validates the required fields and fills the presentation defaults.
    ///
    /// # Errors
    /// `Validation` naming the first of `title`, `category`, `price`, `stock`
    /// that is missing or out of range.
    fn from_create(id: u64, payload: ProductCreate) -> Result<Self, CatalogError> {
        let title = required_text("title", payload.title)?;
        let category = required_text("category", payload.category)?;
        let price = valid_price(payload.price)?;
        let stock = valid_stock(payload.stock)?;

        let thumbnail = match payload.thumbnail.trim() {
            "" => DEFAULT_THUMBNAIL.to_string(),
            url => url.to_string(),
        };

        Ok(Self {
            id,
            title,
            category,
            price,
            reference_price: payload.reference_price,
            stock,
            brand: payload.brand.trim().to_string(),
            images: vec![thumbnail.clone()],
            thumbnail,
            description: payload.description.trim().to_string(),
            rating: 0.0,
        })
    }

    /// Merges the supplied fields over the stored record.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), CatalogError> {
        // Validate everything first so a bad field leaves the record untouched.
        let title = patch.title.map(|t| required_text("title", t)).transpose()?;
        let category = patch.category.map(|c| required_text("category", c)).transpose()?;
        let price = patch.price.map(valid_price).transpose()?;
        let stock = patch.stock.map(valid_stock).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
        if let Some(reference_price) = patch.reference_price {
            self.reference_price = reference_price;
        }
        if let Some(brand) = patch.brand {
            self.brand = brand.trim().to_string();
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = thumbnail.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description.trim().to_string();
        }
        Ok(())
    }
}
