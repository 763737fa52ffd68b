use chub_kernel::config::{ConfigLoader, load_config};
use chub_kernel::domain::config::ApiConfig;
use std::fs;
use tempfile::tempdir;

const NO_ENV: [(&str, &str); 0] = [];

fn write_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 9000

[database]
url = "ws://file-db:8000"

[vision]
url = "http://file-vision:5000"
threshold = 0.5
"#,
    )
    .expect("write config");
    path
}

#[test]
fn missing_default_file_yields_defaults() {
    let cfg: ApiConfig = ConfigLoader::new().env(NO_ENV).load().expect("defaults");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.vision.url, "http://localhost:8081");
}

#[test]
fn explicit_file_must_exist() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");
    assert!(load_config::<ApiConfig>(Some(&missing)).is_err());
}

#[test]
fn file_values_override_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path());

    let cfg: ApiConfig = ConfigLoader::new().path(&path).env(NO_ENV).load().expect("file config");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.database.url, "ws://file-db:8000");
    assert_eq!(cfg.database.namespace, "crafthub");
    assert!((cfg.vision.threshold - 0.5).abs() < f32::EPSILON);
}

#[test]
fn env_and_legacy_variables_win_over_file() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path());

    let cfg: ApiConfig = ConfigLoader::new()
        .path(&path)
        .env([
            ("CHUB__SERVER__PORT", "9100"),
            ("CHUB__VISION__THRESHOLD", "0.7"),
            ("VISION_URL", "http://legacy-vision:8081/detect"),
            ("DB_URI", "ws://legacy-db:8000"),
        ])
        .load()
        .expect("layered config");

    assert_eq!(cfg.server.port, 9100);
    assert!((cfg.vision.threshold - 0.7).abs() < f32::EPSILON);
    assert_eq!(cfg.vision.url, "http://legacy-vision:8081/detect");
    assert_eq!(cfg.database.url, "ws://legacy-db:8000");
}

#[test]
fn legacy_variable_beats_prefixed_one() {
    let cfg: ApiConfig = ConfigLoader::new()
        .env([("CHUB__VISION__URL", "http://prefixed:1"), ("VISION_URL", "http://legacy:2")])
        .load()
        .expect("config");
    assert_eq!(cfg.vision.url, "http://legacy:2");
}

#[test]
fn blank_legacy_variable_is_ignored() {
    let cfg: ApiConfig = ConfigLoader::new().env([("VISION_URL", "   ")]).load().expect("defaults");
    assert_eq!(cfg.vision.url, "http://localhost:8081");
}
