use chub_database::*;

static FIRST: Migration =
    Migration::new("demo", "0001", "DEFINE TABLE IF NOT EXISTS widget SCHEMALESS;");
static SECOND: Migration = Migration::new(
    "demo",
    "0002",
    "DEFINE FIELD IF NOT EXISTS name ON TABLE widget TYPE option<string>;",
);

async fn memory_db(ns: &str) -> Database {
    Database::builder().url("mem://").session(ns, "test_db").init().await.expect("connect to mem://")
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = memory_db("test_ns").await;

    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let err = Database::builder().url("mem://").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn migrations_apply_once() {
    let db = Database::builder()
        .url("mem://")
        .session("migrate_ns", "test_db")
        .migrations([FIRST])
        .init()
        .await
        .expect("init with migrations");

    let report = db.migrate(&[FIRST, SECOND]).await.expect("second run");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.applied[0].version, "0002");

    let report = db.migrate(&[FIRST, SECOND]).await.expect("third run");
    assert!(report.applied.is_empty());
    assert_eq!(report.skipped.len(), 2);
}

#[tokio::test]
async fn changed_migration_is_rejected() {
    let db = memory_db("checksum_ns").await;
    db.migrate(&[FIRST]).await.expect("first run");

    let edited = Migration::new("demo", "0001", "DEFINE TABLE IF NOT EXISTS gadget SCHEMALESS;");
    let err = db.migrate(&[edited]).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Migration { .. }));
}

#[tokio::test]
async fn broken_script_surfaces_engine_error() {
    let db = memory_db("broken_ns").await;
    let broken = Migration::new("demo", "0001", "THIS IS NOT SURREALQL;");

    let err = db.migrate(&[broken]).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Surreal { .. }));
}
