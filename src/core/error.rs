use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::categories::errors::CategoryError;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors, code) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                    None,
                )
            }
            AppError::Category(ref e) => {
                let status = match e {
                    CategoryError::ParentNotFound(_) | CategoryError::NotFound(_) => {
                        StatusCode::NOT_FOUND
                    }
                    CategoryError::DuplicateName(_) | CategoryError::ConstraintViolation(_) => {
                        StatusCode::CONFLICT
                    }
                    CategoryError::DepthExceeded { .. }
                    | CategoryError::ChildLimitExceeded { .. }
                    | CategoryError::ActiveChildrenExist => StatusCode::BAD_REQUEST,
                };
                (status, e.to_string(), None, Some(e.code().to_string()))
            }
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
                None,
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None, None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors).with_code(code));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
