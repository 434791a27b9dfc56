use axum::{extract::State, http::StatusCode, response::Json, routing::get, Extension, Router};

use crate::auth::UserSession;
use crate::models::{ProgressEntry, ProgressHistory, ProgressSubmission};
use crate::services::{ProgressService, ServiceError};

pub fn progress_routes(progress_service: ProgressService) -> Router {
    Router::new()
        .route("/", get(get_history).post(submit_progress))
        .with_state(progress_service)
}

/// Append one entry to the signed-in user's progress log
#[tracing::instrument(skip(progress_service, session, submission), fields(user_id = %session.user_id))]
async fn submit_progress(
    State(progress_service): State<ProgressService>,
    Extension(session): Extension<UserSession>,
    Json(submission): Json<ProgressSubmission>,
) -> Result<(StatusCode, Json<ProgressEntry>), ServiceError> {
    let entry = progress_service.submit(session.user_id, &submission).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[tracing::instrument(skip(progress_service, session), fields(user_id = %session.user_id))]
async fn get_history(
    State(progress_service): State<ProgressService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<ProgressHistory>, ServiceError> {
    let history = progress_service.history(session.user_id).await?;
    Ok(Json(history))
}
