use super::{CatalogStore, unresolved_ids};
use crate::error::CatalogError;
use async_trait::async_trait;
use chub_domain::catalog::{Craft, CraftId, Material, MaterialId, NewCraft, NewMaterial};
use chub_domain::labels::LabelSet;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug)]
struct CraftEntry {
    craft: Craft,
    materials: BTreeSet<MaterialId>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_material_id: MaterialId,
    last_craft_id: CraftId,
    materials: BTreeMap<MaterialId, Material>,
    crafts: BTreeMap<CraftId, CraftEntry>,
}

impl MemoryState {
    fn resolve(&self, ids: &[MaterialId]) -> Vec<Material> {
        ids.iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|id| self.materials.get(id).cloned())
            .collect()
    }

    fn ensure_resolved(&self, ids: &[MaterialId]) -> Result<(), CatalogError> {
        let missing = unresolved_ids(ids, &self.resolve(ids));
        if missing.is_empty() { Ok(()) } else { Err(CatalogError::unresolved_materials(&missing)) }
    }

    fn insert_craft(&mut self, craft: NewCraft, materials: BTreeSet<MaterialId>) -> Craft {
        self.last_craft_id += 1;
        let craft = Craft {
            id: self.last_craft_id,
            name: craft.name,
            description: craft.description,
            image_url: craft.image_url,
        };
        self.crafts.insert(craft.id, CraftEntry { craft: craft.clone(), materials });
        craft
    }

    fn labels_of<'a>(&'a self, entry: &'a CraftEntry) -> impl Iterator<Item = &'a str> + 'a {
        entry.materials.iter().filter_map(|id| self.materials.get(id)).map(|m| m.label.as_str())
    }
}

/// Process-local [`CatalogStore`].
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    state: RwLock<MemoryState>,
}

impl MemoryCatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn create_material(&self, material: NewMaterial) -> Result<Material, CatalogError> {
        let mut state = self.state.write();
        state.last_material_id += 1;
        let material = Material { id: state.last_material_id, name: material.name, label: material.label };
        state.materials.insert(material.id, material.clone());
        Ok(material)
    }

    async fn create_craft(&self, craft: NewCraft) -> Result<Craft, CatalogError> {
        Ok(self.state.write().insert_craft(craft, BTreeSet::new()))
    }

    async fn attach_materials(
        &self,
        craft_id: CraftId,
        material_ids: &[MaterialId],
    ) -> Result<(), CatalogError> {
        let mut state = self.state.write();
        if !state.crafts.contains_key(&craft_id) {
            return Err(CatalogError::craft_not_found(craft_id));
        }
        state.ensure_resolved(material_ids)?;

        if let Some(entry) = state.crafts.get_mut(&craft_id) {
            entry.materials.extend(material_ids.iter().copied());
        }
        Ok(())
    }

    async fn create_craft_with_materials(
        &self,
        craft: NewCraft,
        material_ids: &[MaterialId],
    ) -> Result<Craft, CatalogError> {
        let mut state = self.state.write();
        state.ensure_resolved(material_ids)?;
        Ok(state.insert_craft(craft, material_ids.iter().copied().collect()))
    }

    async fn find_materials_by_ids(&self, ids: &[MaterialId]) -> Result<Vec<Material>, CatalogError> {
        Ok(self.state.read().resolve(ids))
    }

    async fn find_crafts_by_exact_label_set(&self, labels: &LabelSet) -> Result<Vec<Craft>, CatalogError> {
        let state = self.state.read();
        Ok(state
            .crafts
            .values()
            .filter(|entry| labels.is_exactly(state.labels_of(entry)))
            .map(|entry| entry.craft.clone())
            .collect())
    }

    async fn list_materials(&self) -> Result<Vec<Material>, CatalogError> {
        Ok(self.state.read().materials.values().cloned().collect())
    }

    async fn craft_materials(&self, craft_id: CraftId) -> Result<Vec<Material>, CatalogError> {
        let state = self.state.read();
        let entry = state.crafts.get(&craft_id).ok_or_else(|| CatalogError::craft_not_found(craft_id))?;
        Ok(entry.materials.iter().filter_map(|id| state.materials.get(id).cloned()).collect())
    }
}
