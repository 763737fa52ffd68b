use chub_database::DatabaseError;
use chub_domain::catalog::{CraftId, MaterialId};
use std::borrow::Cow;

/// A specialized [`CatalogError`] enum of this crate.
#[chub_derive::chub_error]
pub enum CatalogError {
    /// Input rejected before reaching the store.
    #[error("Catalog validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Catalog entry not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The backing store failed.
    #[error("Catalog storage error{}: {source}", format_context(.context))]
    Storage { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CatalogError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub(crate) fn craft_not_found(id: CraftId) -> Self {
        Self::NotFound { message: format!("craft {id}").into(), context: None }
    }

    pub(crate) fn unresolved_materials(ids: &[MaterialId]) -> Self {
        let list = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        Self::Validation {
            message: format!("unknown material ids: {list}").into(),
            context: None,
        }
    }
}

#[cfg(feature = "server")]
impl From<CatalogError> for chub_kernel::server::error::ApiError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::Validation { .. } => Self::bad_request(message),
            CatalogError::NotFound { .. } => Self::not_found(message),
            CatalogError::Storage { .. } | CatalogError::Internal { .. } => Self::from(message),
        }
    }
}
