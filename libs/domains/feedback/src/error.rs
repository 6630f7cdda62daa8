use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum FeedbackError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Review not found")]
    ReviewNotFound,

    #[error("Embedding computation failed: {0}")]
    Embedding(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// Convert FeedbackError to AppError for standardized error responses.
///
/// Validation maps to 400, the two not-found variants to 404, and both
/// embedding and persistence failures to 500. An embedding failure is only
/// ever surfaced to the worker's direct caller; the intake path swallows it.
impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Validation(msg) => AppError::BadRequest(msg),
            FeedbackError::RestaurantNotFound(id) => {
                AppError::NotFound(format!("Restaurant {} not found", id))
            }
            FeedbackError::ReviewNotFound => AppError::NotFound("Review not found".to_string()),
            FeedbackError::Embedding(msg) => {
                AppError::InternalServerError(format!("Embedding computation failed: {}", msg))
            }
            FeedbackError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for FeedbackError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_validation_maps_to_400() {
        let response = FeedbackError::Validation("Feedback is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_variants_map_to_404() {
        let response = FeedbackError::RestaurantNotFound("R404".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = FeedbackError::ReviewNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_embedding_and_database_map_to_500() {
        let response = FeedbackError::Embedding("model timed out".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = FeedbackError::Database("insert failed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
