use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, ErrorMessageBody, FieldError, ValidationErrorsBody};
use thiserror::Error;

/// Message returned for every missing product.
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("Invalid input: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Store error: {0}")]
    Store(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Store(err.to_string())
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorMessageBody::new(NOT_FOUND_MESSAGE)),
            )
                .into_response(),
            ProductError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationErrorsBody { errors })).into_response()
            }
            ProductError::Store(msg) => AppError::Store(msg).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ProductError::NotFound(10).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ProductError::Validation(vec![]).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProductError::Store("relation \"products\" does not exist".into())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_err_becomes_store_error() {
        let err: ProductError = sea_orm::DbErr::Custom("timeout".to_string()).into();
        assert!(matches!(err, ProductError::Store(msg) if msg.contains("timeout")));
    }
}
