use crate::domain::{slugify, Category, CategoryCreate, CategoryPatch};

use super::entity::{required_text, Entity, EntityKind};
use super::CatalogError;

impl Entity for Category {
    type CreatePayload = CategoryCreate;
    type Patch = CategoryPatch;

    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> u64 {
        self.id
    }

    /// Derives the slug from the trimmed name.
    fn from_create(id: u64, payload: CategoryCreate) -> Result<Self, CatalogError> {
        let name = required_text("name", payload.name)?;
        let value = slugify(&name);
        Ok(Self { id, name, value })
    }

    /// Renames the category. `value` keeps pointing at the same products.
    fn on_update(&mut self, patch: CategoryPatch) -> Result<(), CatalogError> {
        self.name = required_text("name", patch.name)?;
        Ok(())
    }

    fn check_unique(&self, others: &[Self]) -> Result<(), CatalogError> {
        if others.iter().any(|other| other.value == self.value) {
            return Err(CatalogError::validation(
                "value",
                format!("category slug '{}' already exists", self.value),
            ));
        }
        Ok(())
    }
}
