use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Recipe {0} not found")]
    NotFound(String),

    #[error("Invalid recipe id '{0}'")]
    InvalidId(String),

    #[error("Recipe can be rated from 1 to 5, got {0}")]
    InvalidScore(u8),

    #[error("Recipe has reached the maximum number of ratings")]
    RatingsOverflow,

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type RecipeResult<T> = Result<T, RecipeError>;

/// Convert RecipeError to AppError.
///
/// Only malformed input is a client error here; missing recipes, bad ids,
/// bad scores and storage failures all surface as 500. Handlers that answer
/// differently map the error themselves.
impl From<RecipeError> for AppError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::MalformedInput(msg) => AppError::BadRequest(msg),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for RecipeError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for RecipeError {
    fn from(err: mongodb::error::Error) -> Self {
        RecipeError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_invalid_score_message() {
        assert_eq!(
            RecipeError::InvalidScore(9).to_string(),
            "Recipe can be rated from 1 to 5, got 9"
        );
    }

    #[test]
    fn test_status_mapping() {
        let status = |e: RecipeError| AppError::from(e).status();
        assert_eq!(status(RecipeError::MalformedInput("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(RecipeError::NotFound("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status(RecipeError::InvalidId("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status(RecipeError::InvalidScore(0)), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status(RecipeError::RatingsOverflow), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status(RecipeError::Storage("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
