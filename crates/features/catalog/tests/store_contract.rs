//! Behavior every `CatalogStore` adapter must share.

use chub_catalog::{CatalogError, CatalogStore, MIGRATIONS, MemoryCatalogStore, SurrealCatalogStore};
use chub_database::Database;
use chub_domain::catalog::{Material, NewCraft, NewMaterial};
use chub_domain::labels::LabelSet;
use std::collections::BTreeSet;
use std::sync::Arc;

async fn surreal_parts(ns: &str) -> (Database, Arc<dyn CatalogStore>) {
    let db = Database::builder()
        .url("mem://")
        .session(ns, "catalog")
        .migrations(MIGRATIONS)
        .init()
        .await
        .expect("in-memory database");
    (db.clone(), Arc::new(SurrealCatalogStore::new(db)))
}

async fn surreal_store(ns: &str) -> Arc<dyn CatalogStore> {
    surreal_parts(ns).await.1
}

fn memory_store() -> Arc<dyn CatalogStore> {
    Arc::new(MemoryCatalogStore::new())
}

fn labels(items: &[&str]) -> LabelSet {
    items.iter().collect()
}

fn craft(name: &str) -> NewCraft {
    NewCraft::new(name, format!("{name} description"), format!("http://img/{name}"))
}

async fn material(store: &Arc<dyn CatalogStore>, name: &str, label: &str) -> Material {
    store.create_material(NewMaterial::new(name, label)).await.expect("create material")
}

async fn ids_are_sequential(store: Arc<dyn CatalogStore>) {
    let wood = material(&store, "Plank", "wood").await;
    let nail = material(&store, "Nail", "nail").await;
    assert_eq!((wood.id, nail.id), (1, 2));

    let found = store.find_materials_by_ids(&[nail.id, wood.id, 77]).await.expect("find");
    assert_eq!(found, vec![wood.clone(), nail]);
    assert_eq!(store.list_materials().await.expect("list").len(), 2);
    assert!(store.find_materials_by_ids(&[]).await.expect("empty find").is_empty());
}

async fn attach_is_a_union(store: Arc<dyn CatalogStore>) {
    let wood = material(&store, "Plank", "wood").await;
    let nail = material(&store, "Nail", "nail").await;
    let birdhouse = store.create_craft(craft("Birdhouse")).await.expect("create craft");

    assert!(store.craft_materials(birdhouse.id).await.expect("no materials").is_empty());

    store.attach_materials(birdhouse.id, &[nail.id]).await.expect("attach nail");
    store.attach_materials(birdhouse.id, &[wood.id, nail.id]).await.expect("attach both");

    let attached = store.craft_materials(birdhouse.id).await.expect("materials");
    assert_eq!(attached, vec![wood, nail]);
}

async fn attach_rejects_unknown_ids(store: Arc<dyn CatalogStore>) {
    let wood = material(&store, "Plank", "wood").await;
    let birdhouse = store.create_craft(craft("Birdhouse")).await.expect("create craft");

    let err = store.attach_materials(birdhouse.id, &[wood.id, 404]).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation { .. }), "got {err}");
    assert!(store.craft_materials(birdhouse.id).await.expect("materials").is_empty());

    let err = store.attach_materials(999, &[wood.id]).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }), "got {err}");
    let err = store.craft_materials(999).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }), "got {err}");
}

async fn atomic_creation_rejects_unknown_ids(store: Arc<dyn CatalogStore>) {
    let wood = material(&store, "Plank", "wood").await;

    let err = store.create_craft_with_materials(craft("Ghost"), &[wood.id, 12]).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation { .. }), "got {err}");
    assert!(store.find_crafts_by_exact_label_set(&labels(&["wood"])).await.expect("match").is_empty());
}

async fn exact_label_matching(store: Arc<dyn CatalogStore>) {
    let wood = material(&store, "Plank", "wood").await;
    let nail = material(&store, "Nail", "nail").await;
    let paint = material(&store, "Paint", "paint").await;
    let oak = material(&store, "Oak plank", "wood").await;

    let birdhouse =
        store.create_craft_with_materials(craft("Birdhouse"), &[wood.id, nail.id]).await.expect("birdhouse");
    let painted =
        store.create_craft_with_materials(craft("Painted"), &[wood.id, nail.id, paint.id]).await.expect("painted");
    let stool = store.create_craft_with_materials(craft("Stool"), &[wood.id, oak.id]).await.expect("stool");
    store.create_craft(craft("Empty")).await.expect("empty craft");

    let hits = store.find_crafts_by_exact_label_set(&labels(&["nail", "wood"])).await.expect("match");
    assert_eq!(hits, vec![birdhouse]);

    let hits = store.find_crafts_by_exact_label_set(&labels(&["wood", "nail", "paint"])).await.expect("match");
    assert_eq!(hits, vec![painted]);

    // Two materials sharing a label count once.
    let hits = store.find_crafts_by_exact_label_set(&labels(&["wood"])).await.expect("match");
    assert_eq!(hits, vec![stool]);

    assert!(store.find_crafts_by_exact_label_set(&labels(&["glue"])).await.expect("match").is_empty());
    assert!(store.find_crafts_by_exact_label_set(&LabelSet::new()).await.expect("match").is_empty());
}

async fn concurrent_registrations_get_distinct_ids(store: Arc<dyn CatalogStore>) {
    let tasks: Vec<_> = (0..32)
        .map(|index| {
            let store = store.clone();
            tokio::spawn(async move {
                store.create_material(NewMaterial::new(format!("Part {index}"), "wood")).await
            })
        })
        .collect();

    let mut material_ids = BTreeSet::new();
    for task in tasks {
        let material = task.await.expect("join").expect("concurrent material registration");
        material_ids.insert(material.id);
    }
    assert_eq!(material_ids.len(), 32);
    assert_eq!(store.list_materials().await.expect("list").len(), 32);

    let wood = *material_ids.first().expect("a material");
    let tasks: Vec<_> = (0..16)
        .map(|index| {
            let store = store.clone();
            tokio::spawn(async move {
                store.create_craft_with_materials(craft(&format!("Craft {index}")), &[wood]).await
            })
        })
        .collect();

    let mut craft_ids = BTreeSet::new();
    for task in tasks {
        let created = task.await.expect("join").expect("concurrent craft registration");
        craft_ids.insert(created.id);
    }
    assert_eq!(craft_ids.len(), 16);

    let hits = store.find_crafts_by_exact_label_set(&labels(&["wood"])).await.expect("match");
    assert_eq!(hits.into_iter().map(|c| c.id).collect::<BTreeSet<_>>(), craft_ids);
}

macro_rules! contract {
    ($($case:ident),* $(,)?) => {
        mod memory {
            $(
                #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
                async fn $case() {
                    super::$case(super::memory_store()).await;
                }
            )*
        }

        mod surreal {
            $(
                #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
                async fn $case() {
                    super::$case(super::surreal_store(stringify!($case)).await).await;
                }
            )*
        }
    };
}

contract!(
    ids_are_sequential,
    attach_is_a_union,
    attach_rejects_unknown_ids,
    atomic_creation_rejects_unknown_ids,
    exact_label_matching,
    concurrent_registrations_get_distinct_ids,
);

#[tokio::test]
async fn soft_deleted_materials_are_ignored() {
    let (db, store) = surreal_parts("soft_delete").await;
    let wood = material(&store, "Plank", "wood").await;
    let nail = material(&store, "Nail", "nail").await;
    let birdhouse =
        store.create_craft_with_materials(craft("Birdhouse"), &[wood.id, nail.id]).await.expect("birdhouse");
    let shelf = store.create_craft(craft("Shelf")).await.expect("shelf");

    let response = db
        .query(format!("UPDATE material:{} SET deleted_at = time::now()", nail.id))
        .await
        .expect("soft delete");
    assert!(response.check().is_ok());

    assert!(store.find_materials_by_ids(&[nail.id]).await.expect("find").is_empty());
    assert_eq!(store.craft_materials(birdhouse.id).await.expect("materials"), vec![wood]);

    let hits = store.find_crafts_by_exact_label_set(&labels(&["wood", "nail"])).await.expect("match");
    assert!(hits.is_empty());
    let hits = store.find_crafts_by_exact_label_set(&labels(&["wood"])).await.expect("match");
    assert_eq!(hits, vec![birdhouse]);

    let err = store.attach_materials(shelf.id, &[nail.id]).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation { .. }), "got {err}");
}
