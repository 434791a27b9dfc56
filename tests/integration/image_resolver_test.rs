use primal_fit::services::ImageResolver;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{image_config, init_test_logging};

const FALLBACK: &str = "/static/images/fallback/general.jpg";

fn stored_path(root: &std::path::Path, reference: &str) -> std::path::PathBuf {
    root.join(reference.trim_start_matches("/static/"))
}

#[tokio::test]
async fn test_every_provider_failing_yields_fallback() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let root = tempfile::tempdir().unwrap();
    let resolver = ImageResolver::from_config(image_config(&server, root.path())).unwrap();

    for _ in 0..4 {
        assert_eq!(resolver.resolve("push ups exercise proper form").await, FALLBACK);
    }

    // One request per provider per resolve, no retries
    assert_eq!(server.received_requests().await.unwrap().len(), 16);
    assert!(!root.path().join("generated").exists());
}

#[tokio::test]
async fn test_single_searchable_provider_is_downloaded_and_stored() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("query", "goblet squat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "photos": [{"src": {"large": format!("{}/files/goblet.jpg", server.uri())}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/goblet.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"goblet-jpeg".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    let root = tempfile::tempdir().unwrap();
    let resolver = ImageResolver::from_config(image_config(&server, root.path())).unwrap();

    let reference = resolver.resolve("goblet squat").await;

    assert_ne!(reference, FALLBACK);
    assert!(reference.starts_with("/static/generated/"));
    assert!(reference.ends_with(".png"));
    assert_eq!(
        std::fs::read(stored_path(root.path(), &reference)).unwrap(),
        b"goblet-jpeg"
    );
}

#[tokio::test]
async fn test_generated_bytes_are_stored_directly() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2beta/stable-image/generate/core"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG generated".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    let root = tempfile::tempdir().unwrap();
    let resolver = ImageResolver::from_config(image_config(&server, root.path())).unwrap();

    let reference = resolver.resolve("mountain climbers").await;

    assert!(reference.contains("_mountain_climbers_"));
    assert_eq!(
        std::fs::read(stored_path(root.path(), &reference)).unwrap(),
        b"\x89PNG generated"
    );
}

#[tokio::test]
async fn test_provider_without_credentials_is_never_called() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/random"))
        .and(query_param("client_id", "unsplash-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urls": {"regular": format!("{}/files/rows.jpg", server.uri())}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/rows.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"rows".to_vec()))
        .mount(&server)
        .await;
    let root = tempfile::tempdir().unwrap();
    let mut config = image_config(&server, root.path());
    config.stability_api_key = None;
    config.openai_api_key = None;
    config.pexels_api_key = None;
    let resolver = ImageResolver::from_config(config).unwrap();

    let reference = resolver.resolve("bent over rows").await;

    assert!(reference.starts_with("/static/generated/"));
    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|request| request.url.path() == "/photos/random" || request.url.path() == "/files/rows.jpg"));
}
