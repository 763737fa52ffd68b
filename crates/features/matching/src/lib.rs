//! Matching feature slice: identifies crafts that can be built from the materials
//! visible in a photo.

mod engine;
mod error;
#[cfg(feature = "server")]
pub mod http;

pub use crate::engine::MatchingEngine;
pub use crate::error::{MatchingError, MatchingErrorExt};

use chub_catalog::CatalogStore;
use chub_kernel::domain::registry::InitializedSlice;
use chub_vision::Detector;
use std::sync::Arc;

/// Matching feature state
#[chub_derive::chub_slice]
pub struct Matching {
    pub engine: MatchingEngine,
}

/// Initialize the matching feature.
pub fn init(store: Arc<dyn CatalogStore>, detector: Arc<dyn Detector>) -> InitializedSlice {
    tracing::info!(?detector, "Matching slice initialized");

    let engine = MatchingEngine::new(store, detector);
    InitializedSlice::new(Matching::new(MatchingInner { engine }))
}
