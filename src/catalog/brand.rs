use crate::domain::{Brand, BrandCreate, BrandPatch};

use super::entity::{required_text, Entity, EntityKind};
use super::CatalogError;

impl Entity for Brand {
    type CreatePayload = BrandCreate;
    type Patch = BrandPatch;

    const KIND: EntityKind = EntityKind::Brand;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_create(id: u64, payload: BrandCreate) -> Result<Self, CatalogError> {
        Ok(Self {
            id,
            name: required_text("name", payload.name)?,
            description: payload.description.trim().to_string(),
        })
    }

    /// Renaming does not touch products that carry the old name.
    fn on_update(&mut self, patch: BrandPatch) -> Result<(), CatalogError> {
        let name = patch.name.map(|name| required_text("name", name)).transpose()?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description.trim().to_string();
        }
        Ok(())
    }

    fn check_unique(&self, others: &[Self]) -> Result<(), CatalogError> {
        if others.iter().any(|other| other.name == self.name) {
            return Err(CatalogError::validation(
                "name",
                format!("brand '{}' already exists", self.name),
            ));
        }
        Ok(())
    }
}
