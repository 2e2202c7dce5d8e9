//! Landing and health endpoints

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

#[derive(Serialize)]
struct HomeResponse {
    app_name: String,
}

/// GET / - Application title
async fn home(State(state): State<Arc<AppState>>) -> Json<HomeResponse> {
    Json(HomeResponse {
        app_name: state.app_name.clone(),
    })
}

async fn health() -> &'static str {
    "ok"
}
