//! Persistence port for the catalog and its two adapters.
//!
//! [`SurrealCatalogStore`] is the production adapter; [`MemoryCatalogStore`] keeps
//! everything in a process-local map and backs tests and embedded use.

mod memory;
mod surreal;

pub use memory::MemoryCatalogStore;
pub use surreal::SurrealCatalogStore;

use crate::error::CatalogError;
use async_trait::async_trait;
use chub_domain::catalog::{Craft, CraftId, Material, MaterialId, NewCraft, NewMaterial};
use chub_domain::labels::LabelSet;
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Storage operations over materials, crafts and their many-to-many association.
///
/// Identifiers are assigned by the store and never reused.
#[async_trait]
pub trait CatalogStore: Debug + Send + Sync {
    async fn create_material(&self, material: NewMaterial) -> Result<Material, CatalogError>;

    /// Creates a craft with no materials attached.
    async fn create_craft(&self, craft: NewCraft) -> Result<Craft, CatalogError>;

    /// Adds `material_ids` to the craft's material set.
    ///
    /// Fails with [`CatalogError::NotFound`] for an unknown craft and with
    /// [`CatalogError::Validation`] if any material id does not resolve, in which
    /// case nothing is attached.
    async fn attach_materials(
        &self,
        craft_id: CraftId,
        material_ids: &[MaterialId],
    ) -> Result<(), CatalogError>;

    /// Creates a craft and its material set in a single write.
    ///
    /// Unresolved material ids fail with [`CatalogError::Validation`] and no craft
    /// is created.
    async fn create_craft_with_materials(
        &self,
        craft: NewCraft,
        material_ids: &[MaterialId],
    ) -> Result<Craft, CatalogError>;

    /// Returns the subset of `ids` that exists, ordered by id.
    async fn find_materials_by_ids(&self, ids: &[MaterialId]) -> Result<Vec<Material>, CatalogError>;

    /// Crafts whose distinct material labels equal `labels`, ordered by id.
    ///
    /// Crafts without materials never match.
    async fn find_crafts_by_exact_label_set(&self, labels: &LabelSet) -> Result<Vec<Craft>, CatalogError>;

    async fn list_materials(&self) -> Result<Vec<Material>, CatalogError>;

    /// Materials attached to a craft, ordered by id.
    async fn craft_materials(&self, craft_id: CraftId) -> Result<Vec<Material>, CatalogError>;
}

/// Ids from `requested` that are missing from `found`.
pub(crate) fn unresolved_ids(requested: &[MaterialId], found: &[Material]) -> Vec<MaterialId> {
    let found: BTreeSet<MaterialId> = found.iter().map(|m| m.id).collect();
    requested.iter().copied().collect::<BTreeSet<_>>().difference(&found).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_ids_are_sorted_and_unique() {
        let found = vec![Material { id: 2, name: "Wood".into(), label: "wood".into() }];
        assert_eq!(unresolved_ids(&[9, 2, 4, 9], &found), vec![4, 9]);
        assert!(unresolved_ids(&[2, 2], &found).is_empty());
    }
}
