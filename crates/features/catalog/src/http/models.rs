use chub_derive::api_model;
use chub_domain::catalog::{Material, MaterialId};

/// New material. Unknown fields are ignored for compatibility with older clients.
#[api_model(deny_unknown_fields = false)]
pub struct MaterialRequest {
    pub name: String,
    /// Label in the detector's vocabulary.
    #[serde(rename = "MLLabel")]
    pub ml_label: String,
}

/// New craft with the ids of the materials it requires.
#[api_model(deny_unknown_fields = false)]
pub struct CraftRequest {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub material_ids: Vec<MaterialId>,
}

#[api_model]
pub struct MaterialResponse {
    #[serde(rename = "ID")]
    pub id: MaterialId,
    pub name: String,
    #[serde(rename = "MLLabel")]
    pub ml_label: String,
}

impl From<Material> for MaterialResponse {
    fn from(material: Material) -> Self {
        Self { id: material.id, name: material.name, ml_label: material.label }
    }
}
