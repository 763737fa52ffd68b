use crate::error::CatalogError;
use crate::store::CatalogStore;
use chub_domain::catalog::{Craft, CraftId, Material, MaterialId, NewCraft, NewMaterial};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};

/// Validated write path for materials and crafts.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    store: Arc<dyn CatalogStore>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// # Errors
    /// [`CatalogError::Validation`] when `name` or `label` is blank.
    #[instrument(skip(self))]
    pub async fn register_material(&self, name: &str, label: &str) -> Result<Material, CatalogError> {
        let name = required("name", name)?;
        let label = required("label", label)?;

        let material = self.store.create_material(NewMaterial::new(name, label)).await?;
        info!(id = material.id, label = %material.label, "Material registered");
        Ok(material)
    }

    /// Creates a craft together with its materials.
    ///
    /// Duplicate ids collapse. Nothing is written when validation fails.
    ///
    /// # Errors
    /// [`CatalogError::Validation`] for a blank text field, an empty id list, or
    /// ids that do not resolve to materials.
    #[instrument(skip(self, description, image_url))]
    pub async fn register_craft(
        &self,
        name: &str,
        description: &str,
        image_url: &str,
        material_ids: &[MaterialId],
    ) -> Result<Craft, CatalogError> {
        let craft = NewCraft::new(
            required("name", name)?,
            required("description", description)?,
            required("imageUrl", image_url)?,
        );
        let material_ids = distinct_ids(material_ids)?;

        let craft = self.store.create_craft_with_materials(craft, &material_ids).await?;
        info!(id = craft.id, materials = material_ids.len(), "Craft registered");
        Ok(craft)
    }

    /// # Errors
    /// [`CatalogError::NotFound`] for an unknown craft, [`CatalogError::Validation`]
    /// for an empty or unresolvable id list.
    pub async fn attach_materials(
        &self,
        craft_id: CraftId,
        material_ids: &[MaterialId],
    ) -> Result<(), CatalogError> {
        let material_ids = distinct_ids(material_ids)?;
        self.store.attach_materials(craft_id, &material_ids).await
    }

    /// # Errors
    /// [`CatalogError::NotFound`] when the craft does not exist.
    pub async fn craft_materials(&self, craft_id: CraftId) -> Result<Vec<Material>, CatalogError> {
        self.store.craft_materials(craft_id).await
    }

    /// # Errors
    /// Propagates store failures.
    pub async fn list_materials(&self) -> Result<Vec<Material>, CatalogError> {
        self.store.list_materials().await
    }
}

fn required(field: &'static str, value: &str) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::validation(format!("{field} must not be empty")));
    }
    Ok(value.to_owned())
}

fn distinct_ids(ids: &[MaterialId]) -> Result<Vec<MaterialId>, CatalogError> {
    if ids.is_empty() {
        return Err(CatalogError::validation("at least one material id is required"));
    }
    Ok(ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect())
}
