//! Catalog endpoints (/videos)

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::constants::{MSG_CHECK_INPUT, MSG_DUPLICATE, MSG_INVALID_URL, MSG_SAVED, MSG_STORE_FAILURE};
use crate::models::{VideoRecord, summarize_count};
use crate::services::{catalog::CreationFailure, error::LogErr};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/videos", get(list_videos).post(create_video))
}

/// Video API response DTO
#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub notes: Option<String>,
    pub video_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<VideoRecord> for VideoResponse {
    fn from(v: VideoRecord) -> Self {
        Self {
            id: v.id,
            name: v.name,
            url: v.source_url,
            notes: v.notes,
            video_id: v.video_id,
            created_at: v.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VideoListResponse {
    pub videos: Vec<VideoResponse>,
    pub total: usize,
    /// "No videos were found", "1 video", "2 videos", ...
    pub summary: String,
    pub search_term: Option<String>,
}

/// GET /videos?search_term=... - List videos, optionally filtered by name
async fn list_videos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<VideoListResponse>, StatusCode> {
    let videos = state
        .catalog
        .list_videos(query.search_term.as_deref())
        .await
        .log_500("List videos error")?;

    let total = videos.len();

    Ok(Json(VideoListResponse {
        videos: videos.into_iter().map(VideoResponse::from).collect(),
        total,
        summary: summarize_count(total),
        search_term: query.search_term,
    }))
}

/// Form fields of a submission. Echoed back on failure so the client can re-render it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVideoRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateVideoResponse {
    pub message: &'static str,
    pub video: VideoResponse,
}

#[derive(Debug, Serialize)]
pub struct CreateVideoFailure {
    pub messages: Vec<String>,
    pub submitted: CreateVideoRequest,
}

/// POST /videos - Add a video to the catalog
async fn create_video(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateVideoRequest>,
) -> Response {
    let result = state
        .catalog
        .create_video(&req.name, &req.url, req.notes.as_deref())
        .await;

    match result {
        Ok(video) => {
            tracing::info!(video_id = %video.video_id, id = video.id, "Video added");
            (
                StatusCode::CREATED,
                [(header::LOCATION, "/videos")],
                Json(CreateVideoResponse {
                    message: MSG_SAVED,
                    video: video.into(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            let (status, messages) = failure_messages(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "Create video error");
            } else {
                tracing::warn!(reason = %e, url = %req.url, "Video rejected");
            }
            (
                status,
                Json(CreateVideoFailure {
                    messages,
                    submitted: req,
                }),
            )
                .into_response()
        }
    }
}

fn failure_messages(e: &CreationFailure) -> (StatusCode, Vec<String>) {
    match e {
        CreationFailure::InvalidUrl(_) => (
            StatusCode::BAD_REQUEST,
            vec![MSG_INVALID_URL.to_string(), MSG_CHECK_INPUT.to_string()],
        ),
        CreationFailure::InvalidInput(field) => (
            StatusCode::BAD_REQUEST,
            vec![field.to_string(), MSG_CHECK_INPUT.to_string()],
        ),
        CreationFailure::DuplicateVideo => (StatusCode::CONFLICT, vec![MSG_DUPLICATE.to_string()]),
        CreationFailure::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            vec![MSG_STORE_FAILURE.to_string()],
        ),
    }
}
