use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::state::AppState;

/// GET /
/// Serves the frontend HTML page, or a fixed 404 body if it is missing.
pub async fn index_handler(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(&state.config.frontend_index).await {
        Ok(content) => Html(content).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Html("<h1>Frontend not found</h1>".to_string()),
        )
            .into_response(),
    }
}
