use chub_catalog::CatalogError;
use chub_vision::VisionError;
use std::borrow::Cow;

/// A specialized [`MatchingError`] enum of this crate.
#[chub_derive::chub_error]
pub enum MatchingError {
    /// The detector could not label the image.
    #[error("Detection failed{}: {source}", format_context(.context))]
    Vision { source: VisionError, context: Option<Cow<'static, str>> },

    #[error("Craft lookup failed{}: {source}", format_context(.context))]
    Catalog { source: CatalogError, context: Option<Cow<'static, str>> },

    #[error("Internal matching error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
impl From<MatchingError> for chub_kernel::server::error::ApiError {
    fn from(err: MatchingError) -> Self {
        match err {
            MatchingError::Vision { .. } => Self::upstream(err.to_string()),
            MatchingError::Catalog { source, .. } => source.into(),
            MatchingError::Internal { .. } => Self::from(err.to_string()),
        }
    }
}
