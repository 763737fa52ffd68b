//! Catalog feature slice: materials, crafts and the association between them.
//!
//! The write path goes through [`RegistrationService`]; both it and the matching
//! slice share one [`CatalogStore`] handle.

mod error;
#[cfg(feature = "server")]
pub mod http;
pub mod service;
pub mod store;

pub use crate::error::{CatalogError, CatalogErrorExt};
pub use crate::service::RegistrationService;
pub use crate::store::{CatalogStore, MemoryCatalogStore, SurrealCatalogStore};

use chub_database::Migration;
use chub_kernel::domain::registry::InitializedSlice;
use std::sync::Arc;

pub static MIGRATIONS: [Migration; 1] =
    [Migration::new("catalog", "0001", include_str!("../migrations/0001-catalog.surql"))];

/// Catalog feature state
#[chub_derive::chub_slice]
pub struct Catalog {
    pub store: Arc<dyn CatalogStore>,
    pub registration: RegistrationService,
}

/// Initialize the catalog feature over `store`.
pub fn init(store: Arc<dyn CatalogStore>) -> InitializedSlice {
    tracing::info!("Catalog slice initialized");

    let registration = RegistrationService::new(store.clone());
    InitializedSlice::new(Catalog::new(CatalogInner { store, registration }))
}
