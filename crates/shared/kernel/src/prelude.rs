//! Common imports for feature slices.

pub use crate::domain::catalog::{Craft, CraftId, Material, MaterialId, NewCraft, NewMaterial};
pub use crate::domain::labels::LabelSet;
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};

#[cfg(feature = "server")]
pub use crate::server::error::{ApiError, ApiResult};
#[cfg(feature = "server")]
pub use crate::server::state::ApiState;
