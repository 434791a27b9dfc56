use axum::http::StatusCode;
use axum::Router;
use primal_fit::api::plans::{plan_routes, PlanAppState};
use primal_fit::services::{NutritionPlanService, WorkoutPlanService};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    body_json, completion_client, fallback_only_resolver, init_test_logging, json_request,
    mount_completion,
};

fn plan_app(server: &MockServer, root: &std::path::Path) -> Router {
    let completion = completion_client(server);
    plan_routes(PlanAppState {
        nutrition_service: NutritionPlanService::new(completion.clone()),
        workout_service: WorkoutPlanService::new(completion, fallback_only_resolver(root)),
    })
}

#[tokio::test]
async fn test_workout_plan_missing_weekly_sessions_makes_no_external_call() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let root = tempfile::tempdir().unwrap();

    let response = plan_app(&server, root.path())
        .oneshot(json_request(
            "POST",
            "/workout",
            json!({
                "fitness_level": "beginner",
                "workout_type": "strength",
                "available_equipment": "none"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(body["fields"], json!(["weekly_sessions"]));
}

#[tokio::test]
async fn test_nutrition_plan_includes_bmi() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"max_tokens": 1500, "temperature": 0.7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "  **[BMI Analysis]** 22.9 <b>Healthy</b>  "}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let root = tempfile::tempdir().unwrap();

    let response = plan_app(&server, root.path())
        .oneshot(json_request(
            "POST",
            "/nutrition",
            json!({
                "weight": 70,
                "height": "175",
                "calories": 2200,
                "diet_type": "vegetarian"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["plan"], "[BMI Analysis] 22.9 Healthy");
    assert_eq!(body["bmi"], 22.9);
    assert_eq!(body["bmi_note"], "Healthy weight - Maintain your balance");
}

#[tokio::test]
async fn test_nutrition_plan_with_zero_height_has_no_bmi() {
    init_test_logging();
    let server = MockServer::start().await;
    mount_completion(&server, "Plan").await;
    let root = tempfile::tempdir().unwrap();

    let response = plan_app(&server, root.path())
        .oneshot(json_request(
            "POST",
            "/nutrition",
            json!({"weight": 70, "height": 0, "calories": 2000, "diet_type": "keto"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["bmi"].is_null());
    assert_eq!(body["bmi_note"], "");
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;
    let root = tempfile::tempdir().unwrap();

    let response = plan_app(&server, root.path())
        .oneshot(json_request(
            "POST",
            "/workout",
            json!({
                "fitness_level": "advanced",
                "workout_type": "hypertrophy",
                "available_equipment": "full gym",
                "weekly_sessions": 5
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"], "AI API Error");
}

#[tokio::test]
async fn test_malformed_completion_is_server_error() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let root = tempfile::tempdir().unwrap();

    let response = plan_app(&server, root.path())
        .oneshot(json_request(
            "POST",
            "/nutrition",
            json!({"weight": 80, "height": 180, "calories": 2500, "diet_type": "balanced"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Server Error");
}

#[tokio::test]
async fn test_workout_plan_maps_exercise_images() {
    init_test_logging();
    let server = MockServer::start().await;
    mount_completion(
        &server,
        "[Workout Schedule]\nDay 1: Squats, Plank\n\n[Exercise Details]\n• Squats: Legs - 3x10 - Depth\n• Glute Bridge: Glutes - 3x12 - Squeeze",
    )
    .await;
    let root = tempfile::tempdir().unwrap();

    let response = plan_app(&server, root.path())
        .oneshot(json_request(
            "POST",
            "/workout",
            json!({
                "fitness_level": "intermediate",
                "workout_type": "general",
                "available_equipment": "bodyweight",
                "weekly_sessions": "2"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["exercise_images"],
        json!({
            "glute_bridge": "/static/images/fallback/general.jpg",
            "plank": "/static/images/fallback/general.jpg",
            "squats": "/static/images/fallback/general.jpg"
        })
    );
}

#[tokio::test]
async fn test_adapt_returns_fallback_for_unparseable_output() {
    init_test_logging();
    let server = MockServer::start().await;
    mount_completion(&server, "Exercise: Plank\nIntensity: very high").await;
    let root = tempfile::tempdir().unwrap();

    let response = plan_app(&server, root.path())
        .oneshot(json_request(
            "POST",
            "/workout/adapt",
            json!({"prompt": "Something for my core"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["feedback"], "Default workout generated - focus on perfecting form!");
    assert_eq!(body["exercises"][0]["name"], "Bodyweight Squats");
    assert_eq!(body["exercises"][0]["type"], "Strength");
    assert_eq!(body["exercises"][0]["intensity"], 60);
}
