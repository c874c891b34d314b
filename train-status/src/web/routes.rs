//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use tower_http::services::ServeDir;
use tracing::{debug, error};

use crate::estimator::StatusError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(status_page))
        .route("/api/status", get(status_json))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The status card.
///
/// Always answers 200; when no status is available the card says so.
async fn status_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let now = Local::now().naive_local();
    let template = match state.status_at(now).await {
        Ok(status) => StatusTemplate::ok(&status, state.refresh_secs),
        Err(e) => {
            debug!(kind = e.kind(), "status unavailable");
            StatusTemplate::unavailable(
                &state.estimator.config().train_label,
                &e,
                state.refresh_secs,
            )
        }
    };

    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// The status as JSON.
async fn status_json(State(state): State<AppState>) -> Result<Json<StatusResponse>, AppError> {
    let now = Local::now().naive_local();
    let status = state.status_at(now).await?;
    Ok(Json(StatusResponse::from_status(&status)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Unavailable(StatusError),
    Internal { message: String },
}

impl From<StatusError> for AppError {
    fn from(e: StatusError) -> Self {
        AppError::Unavailable(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unavailable(e) => {
                debug!(kind = e.kind(), "status unavailable");
                let body = Json(ErrorResponse::from(&e));
                (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
            }
            AppError::Internal { message } => {
                error!("{message}");
                let body = Json(ErrorResponse {
                    error: message,
                    kind: "internal",
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
