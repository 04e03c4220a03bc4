use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::problems::validate::InvalidSubmission;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Invalid(#[from] InvalidSubmission),

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Invalid timestamp")]
    InvalidTimestamp,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Problem not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Invalid(_) | AppError::InvalidStatus | AppError::InvalidTimestamp => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The real cause stays in the server log, never in the body.
        let message = match &self {
            AppError::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

macro_rules! internal_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

internal_impl!(sqlx::Error);
internal_impl!(uuid::Error);
internal_impl!(time::error::ComponentRange);
internal_impl!(time::error::Format);
