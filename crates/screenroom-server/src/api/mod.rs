pub mod genres;
pub mod movies;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use screenroom_db::AppState;

/// Request-scoped API failure. Every variant maps to one status code and
/// one payload shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("page out of bounds")]
    PageOutOfBounds,

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidParam(reason) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": [reason] }))).into_response()
            }
            // Distinct payload key, kept apart from parameter errors
            ApiError::PageOutOfBounds => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": ["page__out_of_bounds"] })),
            )
                .into_response(),
            ApiError::NotFound(reason) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": [reason] }))).into_response()
            }
            ApiError::Db(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": ["internal_error"] })),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router. Each path is registered with and without
/// the trailing slash so both URL styles resolve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/genres", get(genres::list_genres))
        .route("/genres/", get(genres::list_genres))
        .route("/movies", get(movies::list_movies))
        .route("/movies/", get(movies::list_movies))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/movies/{id}/", get(movies::get_movie))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_payload() {
        let resp = ApiError::InvalidParam("Invalid genre ID".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_payload() {
        let resp = ApiError::NotFound("movie_not_found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_page_out_of_bounds_status() {
        let resp = ApiError::PageOutOfBounds.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
