use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use primal_fit::auth::JwtService;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{body_json, init_test_logging, json_request, test_app, TEST_JWT_SECRET};

#[tokio::test]
async fn test_health_check_endpoint() {
    init_test_logging();
    let server = MockServer::start().await;
    let root = tempfile::tempdir().unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = test_app(&server, root.path()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "primal-fit");
}

#[tokio::test]
async fn test_api_routes_require_a_token() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let root = tempfile::tempdir().unwrap();
    let app = test_app(&server, root.path());

    let requests = vec![
        json_request("POST", "/api/chat", json!({"message": "workout ideas"})),
        json_request("POST", "/api/chat/clear", json!({})),
        json_request("POST", "/api/plans/workout", json!({})),
        json_request("POST", "/api/plans/nutrition", json!({})),
        json_request("POST", "/api/progress", json!({})),
        Request::builder()
            .uri("/api/images?query=squats")
            .body(Body::empty())
            .unwrap(),
        Request::builder()
            .uri("/api/images/page/home")
            .body(Body::empty())
            .unwrap(),
        Request::builder()
            .uri("/api/auth/profile")
            .body(Body::empty())
            .unwrap(),
    ];

    for request in requests {
        let uri = request.uri().to_string();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body_json(response).await["error"], "Missing authorization header");
    }
}

#[tokio::test]
async fn test_malformed_and_forged_tokens_are_rejected() {
    init_test_logging();
    let server = MockServer::start().await;
    let root = tempfile::tempdir().unwrap();
    let app = test_app(&server, root.path());

    let forged = JwtService::new("some-other-secret")
        .create_access_token(Uuid::new_v4(), "runner@example.com")
        .unwrap();

    let basic = Request::builder()
        .uri("/api/progress")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(basic).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let forged_request = Request::builder()
        .uri("/api/progress")
        .header(header::AUTHORIZATION, format!("Bearer {}", forged))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(forged_request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_signed_with_app_secret_is_decodable() {
    let jwt = JwtService::new(TEST_JWT_SECRET);
    let user_id = Uuid::new_v4();

    let token = jwt.create_access_token(user_id, "lifter@example.com").unwrap();
    let session = jwt.extract_user_session(&token).unwrap();

    assert_eq!(session.user_id, user_id);
    assert_eq!(session.email, "lifter@example.com");
}

#[tokio::test]
async fn test_static_files_are_served() {
    init_test_logging();
    let server = MockServer::start().await;
    let root = tempfile::tempdir().unwrap();
    let fallback_dir = root.path().join("images/fallback");
    std::fs::create_dir_all(&fallback_dir).unwrap();
    std::fs::write(fallback_dir.join("general.jpg"), b"fallback-jpeg").unwrap();

    let request = Request::builder()
        .uri("/static/images/fallback/general.jpg")
        .body(Body::empty())
        .unwrap();
    let response = test_app(&server, root.path()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"fallback-jpeg");
}
