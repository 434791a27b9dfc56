use axum::{middleware, routing::get, Router};
use sqlx::PgPool;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::chat::chat_routes;
use super::health::health_check;
use super::images::image_routes;
use super::plans::{plan_routes, PlanAppState};
use super::progress::progress_routes;
use crate::auth::{cors_layer, jwt_auth_middleware, security_headers_layer, AuthService};
use crate::config::AppConfig;
use crate::services::{
    ChatService, ChatSessionStore, CompletionClient, ImageResolver, NutritionPlanService,
    ProgressService, WorkoutPlanService,
};

/// External collaborators the routers are built from
#[derive(Debug, Clone)]
pub struct AppDependencies {
    pub db: PgPool,
    pub completion: CompletionClient,
    pub images: ImageResolver,
    pub chat_sessions: ChatSessionStore,
}

pub fn create_routes(config: &AppConfig, deps: AppDependencies) -> Router {
    let AppDependencies {
        db,
        completion,
        images,
        chat_sessions,
    } = deps;

    let auth_service = AuthService::new(db.clone(), &config.jwt_secret);
    let chat_service = ChatService::new(completion.clone(), images.clone(), chat_sessions);
    let plan_state = PlanAppState {
        nutrition_service: NutritionPlanService::new(completion.clone()),
        workout_service: WorkoutPlanService::new(completion, images.clone()),
    };

    // Everything here requires a bearer token
    let protected_api = Router::new()
        .nest("/chat", chat_routes(chat_service))
        .nest("/images", image_routes(images))
        .nest("/plans", plan_routes(plan_state))
        .nest("/progress", progress_routes(ProgressService::new(db)))
        .route_layer(middleware::from_fn_with_state(
            auth_service.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(auth_service))
        .nest("/api", protected_api)
        .nest_service("/static", ServeDir::new(&config.static_root))
        .layer(security_headers_layer())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
