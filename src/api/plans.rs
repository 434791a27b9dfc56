use axum::{extract::State, response::Json, routing::post, Router};

use crate::models::{
    AdaptWorkoutRequest, AdaptedWorkout, NutritionPlanRequest, NutritionPlanResult, WorkoutPlanRequest,
    WorkoutPlanResult,
};
use crate::services::{NutritionPlanService, ServiceError, WorkoutPlanService};

#[derive(Clone)]
pub struct PlanAppState {
    pub nutrition_service: NutritionPlanService,
    pub workout_service: WorkoutPlanService,
}

/// Plan generation routes. Authentication is layered on by the caller.
pub fn plan_routes(state: PlanAppState) -> Router {
    Router::new()
        .route("/nutrition", post(generate_nutrition_plan))
        .route("/workout", post(generate_workout_plan))
        .route("/workout/adapt", post(adapt_workout))
        .with_state(state)
}

#[tracing::instrument(skip(state, request))]
async fn generate_nutrition_plan(
    State(state): State<PlanAppState>,
    Json(request): Json<NutritionPlanRequest>,
) -> Result<Json<NutritionPlanResult>, ServiceError> {
    let result = state.nutrition_service.generate(&request).await?;
    Ok(Json(result))
}

#[tracing::instrument(skip(state, request))]
async fn generate_workout_plan(
    State(state): State<PlanAppState>,
    Json(request): Json<WorkoutPlanRequest>,
) -> Result<Json<WorkoutPlanResult>, ServiceError> {
    let result = state.workout_service.generate(&request).await?;
    Ok(Json(result))
}

#[tracing::instrument(skip(state, request))]
async fn adapt_workout(
    State(state): State<PlanAppState>,
    Json(request): Json<AdaptWorkoutRequest>,
) -> Result<Json<AdaptedWorkout>, ServiceError> {
    let workout = state.workout_service.adapt(&request).await?;
    Ok(Json(workout))
}
