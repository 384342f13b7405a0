use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product with id {0} not found")]
    ProductNotFound(i32),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Quantity must be greater than zero")]
    InvalidQuantity(i32),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i32, available: i32 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Convert InventoryError to AppError for standardized error responses
impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::ProductNotFound(_) => AppError::NotFound(err.to_string()),
            InventoryError::DuplicateName(_) | InventoryError::InsufficientStock { .. } => {
                AppError::Conflict(err.to_string())
            }
            InventoryError::InvalidQuantity(_) => AppError::BadRequest(err.to_string()),
            InventoryError::Validation(msg) => AppError::BadRequest(msg),
            InventoryError::Database(e) => AppError::Database(e),
            InventoryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for InventoryError {
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
    fn test_status_mapping() {
        let cases = [
            (InventoryError::ProductNotFound(3), StatusCode::NOT_FOUND),
            (
                InventoryError::DuplicateName("Widget".into()),
                StatusCode::CONFLICT,
            ),
            (
                InventoryError::InsufficientStock {
                    requested: 5,
                    available: 2,
                },
                StatusCode::CONFLICT,
            ),
            (InventoryError::InvalidQuantity(0), StatusCode::BAD_REQUEST),
            (
                InventoryError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                InventoryError::Database(DbErr::Custom("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            InventoryError::ProductNotFound(7).to_string(),
            "Product with id 7 not found"
        );
        assert_eq!(
            InventoryError::InvalidQuantity(-1).to_string(),
            "Quantity must be greater than zero"
        );
    }
}
