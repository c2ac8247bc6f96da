use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failure while talking to the checks store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sql error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("sqlite migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("invalid ClickHouse url: {0}")]
    InvalidUrl(String),

    #[error("ClickHouse request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ClickHouse error {status}: {body}")]
    ClickHouse {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("ClickHouse response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Store(e) => {
                tracing::error!(error = %e, "chart query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_hide_details_from_clients() {
        let err = ApiError::from(StoreError::InvalidUrl("nope".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::NotFound("no row".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
