use axum::{extract::State, response::Json, routing::post, Extension, Router};
use serde_json::{json, Value};

use crate::auth::UserSession;
use crate::models::{ChatReply, ChatRequest};
use crate::services::ChatService;

pub fn chat_routes(chat_service: ChatService) -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/clear", post(clear_chat))
        .with_state(chat_service)
}

/// One chat turn for the signed-in user
#[tracing::instrument(skip(chat_service, session, request), fields(user_id = %session.user_id))]
async fn send_message(
    State(chat_service): State<ChatService>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    Json(chat_service.reply(session.user_id, &request.message).await)
}

#[tracing::instrument(skip(chat_service, session), fields(user_id = %session.user_id))]
async fn clear_chat(
    State(chat_service): State<ChatService>,
    Extension(session): Extension<UserSession>,
) -> Json<Value> {
    chat_service.clear(session.user_id).await;
    Json(json!({ "status": "success" }))
}
