//! Facade crate for `CraftHub` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `chub` with the `server` feature for the HTTP surface.
//! - Run [`migrations`] through the database builder, then call [`init`] to obtain
//!   the feature slices for the API state.

use chub_catalog::CatalogStore;
use chub_database::Migration;
pub use chub_domain as domain;
use chub_domain::registry::InitializedSlice;
pub use chub_kernel as kernel;
pub use chub_vision as vision;
use chub_vision::Detector;
use std::sync::Arc;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use chub_kernel::server::state::ApiState;
        use utoipa_axum::router::OpenApiRouter;

        pub use chub_catalog::http::catalog_router;
        pub use chub_kernel::server::router::system_router;
        pub use chub_matching::http::matching_router;

        /// Every feature route plus `/health` and `/ping`.
        ///
        /// `max_upload_bytes` bounds the `/vision` request body only.
        pub fn api_router(max_upload_bytes: usize) -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(system_router())
                .merge(catalog_router())
                .merge(matching_router(max_upload_bytes))
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use chub_catalog as catalog;
    pub use chub_matching as matching;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "catalog",
        "matching",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Schema migrations of every slice, in application order.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    features::catalog::MIGRATIONS.to_vec()
}

/// Initialize all feature slices over a shared catalog store.
pub fn init(store: Arc<dyn CatalogStore>, detector: Arc<dyn Detector>) -> Vec<InitializedSlice> {
    let slices = vec![
        features::catalog::init(store.clone()),
        features::matching::init(store, detector),
    ];
    tracing::debug!(count = slices.len(), "Feature slices initialized");
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use chub_catalog::MemoryCatalogStore;
    use chub_vision::{ImageUpload, VisionError};

    #[derive(Debug)]
    struct Blind;

    #[async_trait::async_trait]
    impl Detector for Blind {
        async fn detect(&self, _image: ImageUpload) -> Result<Vec<String>, VisionError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn init_registers_every_slice() {
        let slices = init(Arc::new(MemoryCatalogStore::new()), Arc::new(Blind));
        let mut names: Vec<_> = slices.iter().map(|slice| slice.name).collect();
        names.sort_unstable();

        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|name| name.ends_with("Catalog")));
        assert!(names.iter().any(|name| name.ends_with("Matching")));
    }

    #[test]
    fn migrations_are_listed_once() {
        let migrations = migrations();
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].slice, "catalog");
        assert!(features::is_enabled("matching"));
        assert!(!features::is_enabled("licensing"));
    }
}
