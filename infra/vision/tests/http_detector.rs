use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chub_domain::config::VisionConfig;
use chub_vision::{Detector, HttpDetector, ImageUpload, VisionError};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Echoes the multipart fields it received so assertions can inspect them.
async fn echo_detector(mut multipart: Multipart) -> Json<Value> {
    let mut threshold = None;
    let mut filename = None;
    let mut size = 0;
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        match field.name() {
            Some("threshold") => threshold = Some(field.text().await.expect("threshold text")),
            Some("img") => {
                filename = field.file_name().map(str::to_owned);
                size = field.bytes().await.expect("image bytes").len();
            },
            _ => {},
        }
    }

    Json(json!({
        "objects": [
            format!("threshold={}", threshold.unwrap_or_default()),
            format!("file={}", filename.unwrap_or_default()),
            format!("size={size}"),
        ]
    }))
}

async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake detector");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve fake detector");
    });
    addr
}

fn detector_for(addr: SocketAddr, path: &str) -> HttpDetector {
    let config = VisionConfig {
        url: format!("http://{addr}{path}"),
        threshold: 0.4,
        connect_timeout_secs: 2,
        timeout_secs: 5,
        ..VisionConfig::default()
    };
    HttpDetector::from_config(&config).expect("detector config")
}

fn photo() -> ImageUpload {
    ImageUpload::new("birdhouse.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0]).with_content_type("image/jpeg")
}

#[tokio::test]
async fn sends_threshold_and_image_part() {
    let addr = spawn(Router::new().route("/detect", post(echo_detector))).await;
    let labels = detector_for(addr, "/detect").detect(photo()).await.expect("detect");

    assert_eq!(labels, vec!["threshold=0.4", "file=birdhouse.jpg", "size=4"]);
}

#[tokio::test]
async fn returns_labels_verbatim() {
    let router = Router::new().route(
        "/",
        post(|| async { Json(json!({ "objects": ["wood", "nail", "wood", "paint"] })) }),
    );
    let addr = spawn(router).await;

    let labels = detector_for(addr, "/").detect(photo()).await.expect("detect");
    assert_eq!(labels, vec!["wood", "nail", "wood", "paint"]);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let router = Router::new()
        .route("/", post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }));
    let addr = spawn(router).await;

    let err = detector_for(addr, "/").detect(photo()).await.unwrap_err();
    match err {
        VisionError::Status { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "model loading");
        },
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let router = Router::new().route("/", post(|| async { Json(json!({ "labels": ["wood"] })) }));
    let addr = spawn(router).await;

    let err = detector_for(addr, "/").detect(photo()).await.unwrap_err();
    assert!(matches!(err, VisionError::Decode { .. }), "got {err}");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = detector_for(addr, "/").detect(photo()).await.unwrap_err();
    assert!(matches!(err, VisionError::Transport { .. }), "got {err}");
}

#[test]
fn invalid_configuration_is_rejected() {
    let bad_url = VisionConfig { url: "not a url".to_owned(), ..VisionConfig::default() };
    assert!(matches!(
        HttpDetector::from_config(&bad_url),
        Err(VisionError::Configuration { .. })
    ));

    let bad_threshold = VisionConfig { threshold: 1.5, ..VisionConfig::default() };
    assert!(matches!(
        HttpDetector::from_config(&bad_threshold),
        Err(VisionError::Configuration { .. })
    ));
}

#[tokio::test]
async fn malformed_content_type_is_rejected_before_sending() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let image = ImageUpload::new("birdhouse.jpg", vec![0xFF]).with_content_type("not a mime type");
    let err = detector_for(addr, "/").detect(image).await.unwrap_err();
    assert!(matches!(err, VisionError::Internal { .. }), "got {err}");
}
