//! Health check and test page

use std::sync::Arc;

use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use crate::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub budget_model_status: &'static str,
}

/// GET /health - Liveness plus budget model status
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let budget_model_status = if state.model_loaded() {
        "loaded"
    } else {
        "not_loaded"
    };

    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        budget_model_status,
    })
}

/// GET / - Manual test page for the budget forecast endpoint
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
