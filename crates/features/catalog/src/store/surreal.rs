use super::{CatalogStore, unresolved_ids};
use crate::error::CatalogError;
use async_trait::async_trait;
use chub_database::{Database, DatabaseErrorExt};
use chub_domain::catalog::{Craft, CraftId, Material, MaterialId, NewCraft, NewMaterial};
use chub_domain::constants::{CRAFT, MATERIAL};
use chub_domain::labels::LabelSet;
use surrealdb::types::SurrealValue;
use tracing::{debug, instrument};

const MATERIAL_FIELDS: &str = "id.id() AS id, name, label";
const CRAFT_FIELDS: &str = "id.id() AS id, name, description, image_url";

#[derive(Debug, SurrealValue)]
struct MaterialRow {
    id: i64,
    name: String,
    label: String,
}

impl From<MaterialRow> for Material {
    fn from(row: MaterialRow) -> Self {
        Self { id: row.id, name: row.name, label: row.label }
    }
}

#[derive(Debug, SurrealValue)]
struct CraftRow {
    id: i64,
    name: String,
    description: String,
    image_url: String,
}

impl From<CraftRow> for Craft {
    fn from(row: CraftRow) -> Self {
        Self { id: row.id, name: row.name, description: row.description, image_url: row.image_url }
    }
}

fn sorted<R, T>(rows: Vec<R>, key: impl Fn(&T) -> i64) -> Vec<T>
where
    T: From<R>,
{
    let mut items: Vec<T> = rows.into_iter().map(T::from).collect();
    items.sort_by_key(key);
    items
}

/// [`CatalogStore`] backed by `SurrealDB`.
///
/// Records use integer keys (`material:1`, `craft:7`) drawn from the `material_seq`
/// and `craft_seq` sequences. A craft stores its materials as an array of record links.
/// Soft-deleted materials are ignored wherever a craft's links are read.
#[derive(Debug, Clone)]
pub struct SurrealCatalogStore {
    db: Database,
}

impl SurrealCatalogStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Reserves the next integer key for `table`.
    async fn next_id(&self, table: &'static str) -> Result<i64, CatalogError> {
        let id = self
            .db
            .query(format!("RETURN sequence::nextval('{table}_seq')"))
            .await
            .context("Reserving record id")?
            .take::<Option<i64>>(0)
            .context("Reading reserved id")?;

        id.ok_or_else(|| CatalogError::Internal {
            message: format!("sequence {table}_seq returned no value").into(),
            context: None,
        })
    }

    async fn craft_exists(&self, craft_id: CraftId) -> Result<bool, CatalogError> {
        let ids = self
            .db
            .query("SELECT VALUE id.id() FROM craft WHERE id.id() = $craft_id AND deleted_at = NONE")
            .bind(("craft_id", craft_id))
            .await
            .context("Looking up craft")?
            .take::<Vec<i64>>(0)
            .context("Reading craft lookup")?;

        Ok(!ids.is_empty())
    }

    async fn ensure_resolved(&self, material_ids: &[MaterialId]) -> Result<(), CatalogError> {
        let found = self.find_materials_by_ids(material_ids).await?;
        let missing = unresolved_ids(material_ids, &found);
        if missing.is_empty() { Ok(()) } else { Err(CatalogError::unresolved_materials(&missing)) }
    }

    async fn insert_craft(
        &self,
        craft: NewCraft,
        material_ids: Vec<MaterialId>,
    ) -> Result<Craft, CatalogError> {
        let id = self.next_id(CRAFT).await?;

        self.db
            .query(
                "CREATE ONLY craft CONTENT {
                    id: $id,
                    name: $name,
                    description: $description,
                    image_url: $image_url,
                    materials: (SELECT VALUE id FROM material WHERE id.id() INSIDE $material_ids AND deleted_at = NONE)
                } RETURN NONE",
            )
            .bind(("id", id))
            .bind(("name", craft.name.clone()))
            .bind(("description", craft.description.clone()))
            .bind(("image_url", craft.image_url.clone()))
            .bind(("material_ids", material_ids))
            .await
            .context("Creating craft")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Craft rejected")?;

        debug!(id, "Craft created");
        Ok(Craft { id, name: craft.name, description: craft.description, image_url: craft.image_url })
    }
}

#[async_trait]
impl CatalogStore for SurrealCatalogStore {
    #[instrument(skip_all, fields(label = %material.label))]
    async fn create_material(&self, material: NewMaterial) -> Result<Material, CatalogError> {
        let id = self.next_id(MATERIAL).await?;

        self.db
            .query("CREATE ONLY material CONTENT { id: $id, name: $name, label: $label } RETURN NONE")
            .bind(("id", id))
            .bind(("name", material.name.clone()))
            .bind(("label", material.label.clone()))
            .await
            .context("Creating material")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Material rejected")?;

        debug!(id, "Material created");
        Ok(Material { id, name: material.name, label: material.label })
    }

    async fn create_craft(&self, craft: NewCraft) -> Result<Craft, CatalogError> {
        self.insert_craft(craft, Vec::new()).await
    }

    #[instrument(skip(self))]
    async fn attach_materials(
        &self,
        craft_id: CraftId,
        material_ids: &[MaterialId],
    ) -> Result<(), CatalogError> {
        if !self.craft_exists(craft_id).await? {
            return Err(CatalogError::craft_not_found(craft_id));
        }
        self.ensure_resolved(material_ids).await?;

        self.db
            .query(
                "UPDATE craft
                SET materials = array::union(materials, (SELECT VALUE id FROM material WHERE id.id() INSIDE $material_ids AND deleted_at = NONE))
                WHERE id.id() = $craft_id
                RETURN NONE",
            )
            .bind(("craft_id", craft_id))
            .bind(("material_ids", material_ids.to_vec()))
            .await
            .context("Attaching materials")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Attachment rejected")?;

        Ok(())
    }

    #[instrument(skip_all, fields(name = %craft.name, materials = material_ids.len()))]
    async fn create_craft_with_materials(
        &self,
        craft: NewCraft,
        material_ids: &[MaterialId],
    ) -> Result<Craft, CatalogError> {
        self.ensure_resolved(material_ids).await?;
        self.insert_craft(craft, material_ids.to_vec()).await
    }

    async fn find_materials_by_ids(&self, ids: &[MaterialId]) -> Result<Vec<Material>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .db
            .query(format!(
                "SELECT {MATERIAL_FIELDS} FROM material WHERE id.id() INSIDE $ids AND deleted_at = NONE"
            ))
            .bind(("ids", ids.to_vec()))
            .await
            .context("Resolving materials")?
            .take::<Vec<MaterialRow>>(0)
            .context("Reading materials")?;

        Ok(sorted(rows, |m: &Material| m.id))
    }

    #[instrument(skip_all, fields(labels = labels.len()))]
    async fn find_crafts_by_exact_label_set(&self, labels: &LabelSet) -> Result<Vec<Craft>, CatalogError> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .db
            .query(format!(
                "SELECT {CRAFT_FIELDS} FROM craft
                WHERE deleted_at = NONE
                    AND array::len(materials[WHERE deleted_at = NONE]) > 0
                    AND materials[WHERE deleted_at = NONE].label ALLINSIDE $labels
                    AND array::len(array::distinct(materials[WHERE deleted_at = NONE].label)) = $count"
            ))
            .bind(("labels", labels.clone().into_vec()))
            .bind(("count", i64::try_from(labels.len()).unwrap_or(i64::MAX)))
            .await
            .context("Matching crafts")?
            .take::<Vec<CraftRow>>(0)
            .context("Reading matched crafts")?;

        Ok(sorted(rows, |c: &Craft| c.id))
    }

    async fn list_materials(&self) -> Result<Vec<Material>, CatalogError> {
        let rows = self
            .db
            .query(format!("SELECT {MATERIAL_FIELDS} FROM material WHERE deleted_at = NONE"))
            .await
            .context("Listing materials")?
            .take::<Vec<MaterialRow>>(0)
            .context("Reading materials")?;

        Ok(sorted(rows, |m: &Material| m.id))
    }

    async fn craft_materials(&self, craft_id: CraftId) -> Result<Vec<Material>, CatalogError> {
        if !self.craft_exists(craft_id).await? {
            return Err(CatalogError::craft_not_found(craft_id));
        }

        let rows = self
            .db
            .query(format!(
                "SELECT {MATERIAL_FIELDS} FROM material
                WHERE id INSIDE array::flatten((SELECT VALUE materials FROM craft WHERE id.id() = $craft_id))
                    AND deleted_at = NONE"
            ))
            .bind(("craft_id", craft_id))
            .await
            .context("Loading craft materials")?
            .take::<Vec<MaterialRow>>(0)
            .context("Reading craft materials")?;

        Ok(sorted(rows, |m: &Material| m.id))
    }
}
