//! A craft is returned iff the distinct labels of its materials equal the detected set.

use chub_catalog::{CatalogStore, MemoryCatalogStore, RegistrationService};
use chub_matching::MatchingEngine;
use chub_vision::{Detector, ImageUpload, VisionError};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

const VOCABULARY: [&str; 5] = ["wood", "nail", "paint", "glue", "string"];

#[derive(Debug)]
struct NoDetector;

#[async_trait::async_trait]
impl Detector for NoDetector {
    async fn detect(&self, _image: ImageUpload) -> Result<Vec<String>, VisionError> {
        Err("not used".into())
    }
}

fn label() -> impl Strategy<Value = &'static str> {
    prop::sample::select(VOCABULARY.to_vec())
}

fn crafts() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
    prop::collection::vec(prop::collection::vec(label(), 1..5), 1..8)
}

fn detected() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(label(), 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matches_exactly_equal_label_sets(crafts in crafts(), detected in detected()) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");

        let (expected, actual) = runtime.block_on(async {
            let store: Arc<dyn CatalogStore> = Arc::new(MemoryCatalogStore::new());
            let registration = RegistrationService::new(store.clone());

            let mut expected = Vec::new();
            let wanted: BTreeSet<&str> = detected.iter().copied().collect();
            for (index, labels) in crafts.iter().enumerate() {
                let mut ids = Vec::new();
                for label in labels {
                    ids.push(registration.register_material(label, label).await.expect("material").id);
                }
                let craft = registration
                    .register_craft(&format!("craft-{index}"), "d", "http://img", &ids)
                    .await
                    .expect("craft");

                let own: BTreeSet<&str> = labels.iter().copied().collect();
                if !wanted.is_empty() && own == wanted {
                    expected.push(craft.id);
                }
            }

            let engine = MatchingEngine::new(store, Arc::new(NoDetector));
            let actual: Vec<i64> =
                engine.match_labels(&detected).await.expect("match").into_iter().map(|c| c.id).collect();
            (expected, actual)
        });

        prop_assert_eq!(expected, actual);
    }
}
