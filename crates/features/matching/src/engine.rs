use crate::error::MatchingError;
use chub_catalog::CatalogStore;
use chub_domain::catalog::Craft;
use chub_domain::labels::LabelSet;
use chub_vision::{Detector, ImageUpload};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Resolves detected labels to the crafts whose material labels are exactly that set.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    store: Arc<dyn CatalogStore>,
    detector: Arc<dyn Detector>,
}

impl MatchingEngine {
    pub fn new(store: Arc<dyn CatalogStore>, detector: Arc<dyn Detector>) -> Self {
        Self { store, detector }
    }

    /// Crafts matching `labels`, ordered by id.
    ///
    /// Labels are trimmed and de-duplicated first. An empty set matches nothing and
    /// does not reach the store.
    ///
    /// # Errors
    /// [`MatchingError::Catalog`] when the store lookup fails.
    #[instrument(skip_all)]
    pub async fn match_labels<I, S>(&self, labels: I) -> Result<Vec<Craft>, MatchingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: LabelSet = labels.into_iter().collect();
        if labels.is_empty() {
            debug!("No labels detected");
            return Ok(Vec::new());
        }

        let mut crafts = self.store.find_crafts_by_exact_label_set(&labels).await?;
        crafts.sort_by_key(|craft| craft.id);
        debug!(labels = ?labels, matches = crafts.len(), "Matched crafts");
        Ok(crafts)
    }

    /// Runs the detector over `image`, then [`match_labels`](Self::match_labels).
    ///
    /// # Errors
    /// [`MatchingError::Vision`] when detection fails, [`MatchingError::Catalog`]
    /// when the lookup fails.
    #[instrument(skip_all, fields(filename = %image.filename))]
    pub async fn match_image(&self, image: ImageUpload) -> Result<Vec<Craft>, MatchingError> {
        let labels = self.detector.detect(image).await?;
        self.match_labels(labels).await
    }
}
