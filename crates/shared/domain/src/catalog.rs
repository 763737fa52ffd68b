//! Catalog entities: materials, crafts and their creation payloads.
//!
//! Persisted audit columns (`created_at`, `updated_at`, `deleted_at`) never leave the
//! store, so these types only carry the public attributes.

use serde::{Deserialize, Serialize};

pub type MaterialId = i64;
pub type CraftId = i64;

/// A named, recognition-labeled component that can be detected in an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    /// Key in the external detector's vocabulary.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaterial {
    pub name: String,
    pub label: String,
}

impl NewMaterial {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self { name: name.into(), label: label.into() }
    }
}

/// A named item whose creation requires a fixed set of materials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Craft {
    pub id: CraftId,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCraft {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl NewCraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), description: description.into(), image_url: image_url.into() }
    }
}
