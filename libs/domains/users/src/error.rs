use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound(i32),

    #[error("User with this email not found")]
    EmailNotFound(String),

    #[error("User with this email already exists")]
    DuplicateEmail(String),

    #[error("User with this username already exists")]
    DuplicateUsername(String),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("User is not authenticated")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::EmailNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            UserError::DuplicateEmail(_) | UserError::DuplicateUsername(_) => {
                AppError::Conflict(err.to_string())
            }
            UserError::InvalidPassword => AppError::BadRequest(err.to_string()),
            UserError::Unauthenticated => AppError::Unauthorized(err.to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::Database(e) => AppError::Database(e),
            UserError::PasswordHash(msg) | UserError::Token(msg) | UserError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
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
            (UserError::NotFound(1), StatusCode::NOT_FOUND),
            (
                UserError::EmailNotFound("a@b.c".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                UserError::DuplicateEmail("a@b.c".into()),
                StatusCode::CONFLICT,
            ),
            (
                UserError::DuplicateUsername("alice".into()),
                StatusCode::CONFLICT,
            ),
            (UserError::InvalidPassword, StatusCode::BAD_REQUEST),
            (UserError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                UserError::PasswordHash("salt".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserError::Token("sign".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_messages_do_not_leak_input() {
        assert_eq!(
            UserError::EmailNotFound("secret@example.com".into()).to_string(),
            "User with this email not found"
        );
        assert_eq!(
            UserError::DuplicateEmail("secret@example.com".into()).to_string(),
            "User with this email already exists"
        );
    }
}
