use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    domain::{CartError, CatalogError, CheckoutError, ValidationError, backup::BackupError},
    response::{ApiResponse, Meta},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cart update failed: {0}")]
    Cart(#[from] CartError),

    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Restore failed: {0}")]
    Backup(#[from] BackupError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Invalid(err) => AppError::Validation(err),
            CatalogError::NotFound(_) => AppError::NotFound,
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Cart(CartError::NotInCart(_)) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Cart(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Checkout(CheckoutError::UnknownProduct(_)) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            AppError::Checkout(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Backup(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = ApiResponse {
            message,
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
