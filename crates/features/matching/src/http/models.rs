use chub_derive::api_model;
use chub_domain::catalog::{Craft, CraftId};

/// A craft whose material set matches the photo.
#[api_model]
pub struct CraftResponse {
    #[serde(rename = "ID")]
    pub id: CraftId,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl From<Craft> for CraftResponse {
    fn from(craft: Craft) -> Self {
        Self { id: craft.id, name: craft.name, description: craft.description, image_url: craft.image_url }
    }
}
