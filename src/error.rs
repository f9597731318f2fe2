use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the store itself.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No partition holds the id. Fan-out lookups emit this only after every
    /// known category has been checked.
    #[error("recipe not found with id: {0}")]
    NotFound(String),

    /// A category move created the new record but failed to remove the
    /// original, leaving a potential duplicate under the old id. The
    /// in-memory catalog cannot fail mid-move, so this variant is reserved
    /// for substrates whose removal step can; it must surface to the caller,
    /// never collapse into a plain success.
    #[error(
        "recipe moved to category '{category}' as {new_id}, but the original {old_id} could not be removed and may remain as a duplicate"
    )]
    MoveIncomplete {
        old_id: String,
        new_id: String,
        category: String,
    },
}

/// Input rejections owned by the DTO layer, not the store.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,

    #[error("at least one ingredient is required")]
    NoIngredients,

    #[error("instructions are required")]
    MissingInstructions,

    #[error("cooking time must be at least 1 minute")]
    CookingTimeTooShort,
}

/// Everything a handler can answer with besides a payload.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("missing x-username header")]
    MissingIdentity,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::MoveIncomplete { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingIdentity => StatusCode::UNAUTHORIZED,
        };

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
