use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

use crate::services::ImageResolver;

const DEFAULT_IMAGE_QUERY: &str = "fitness";

/// Showcase slots per page, `(slot, query)`
fn page_queries(page: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match page {
        "home" => Some(&[
            ("hero", "fitness motivation"),
            ("about", "gym equipment"),
            ("music", "workout music"),
            ("podcast", "fitness podcast"),
        ]),
        "workouts" => Some(&[
            ("workout", "personalized workout"),
            ("progress", "fitness progress tracking"),
        ]),
        "chatbot" => Some(&[("chatbot", "fitness chatbot")]),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageImagesResponse {
    pub page: String,
    pub images: BTreeMap<String, String>,
}

pub fn image_routes(images: ImageResolver) -> Router {
    Router::new()
        .route("/", get(get_image))
        .route("/page/:page", get(get_page_images))
        .with_state(images)
}

/// Resolve one image for an arbitrary query
#[tracing::instrument(skip(images))]
async fn get_image(
    State(images): State<ImageResolver>,
    Query(params): Query<ImageQuery>,
) -> Json<ImageResponse> {
    let query = params
        .query
        .filter(|query| !query.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_QUERY.to_string());

    Json(ImageResponse {
        url: images.resolve(&query).await,
    })
}

/// Resolve every showcase image of a page
#[tracing::instrument(skip(images))]
async fn get_page_images(State(images): State<ImageResolver>, Path(page): Path<String>) -> Response {
    let Some(slots) = page_queries(&page) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Not found",
                "message": format!("Unknown page: {}", page)
            })),
        )
            .into_response();
    };

    let urls = join_all(slots.iter().map(|(_, query)| images.resolve(query))).await;
    let images = slots
        .iter()
        .map(|(slot, _)| slot.to_string())
        .zip(urls)
        .collect();

    Json(PageImagesResponse { page, images }).into_response()
}
