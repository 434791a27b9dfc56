use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::completion_client::CompletionError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("AI API Error: {0}")]
    Completion(#[from] CompletionError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn invalid(field: &'static str, reason: impl ToString) -> Self {
        ServiceError::InvalidField {
            field,
            reason: reason.to_string(),
        }
    }

    /// Fail with the missing field names, if there are any
    pub fn check_required(missing: Vec<&'static str>) -> Result<(), Self> {
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::MissingFields(missing))
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServiceError::MissingFields(_) => (StatusCode::BAD_REQUEST, "Missing required fields"),
            ServiceError::InvalidField { .. } => (StatusCode::BAD_REQUEST, "Invalid field"),
            ServiceError::Completion(e) if e.is_upstream() => (StatusCode::BAD_GATEWAY, "AI API Error"),
            ServiceError::Completion(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server Error"),
            ServiceError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            ServiceError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server Error"),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let mut body = json!({
            "error": error_code,
            "message": self.to_string(),
        });
        if let ServiceError::MissingFields(fields) = &self {
            body["fields"] = json!(fields);
        }

        (status, Json(body)).into_response()
    }
}
