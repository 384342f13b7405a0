//! Machine-readable error codes carried in `error.code` of failed responses.
//!
//! The numeric id is only logged (`error_code` field); clients see the
//! SCREAMING_SNAKE_CASE name.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! error_codes {
    ($($variant:ident = $id:literal, $name:literal, $message:literal;)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum ErrorCode {
            $($variant,)+
        }

        impl ErrorCode {
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            pub fn code(&self) -> i32 {
                match self {
                    $(Self::$variant => $id,)+
                }
            }

            /// Message used when the error has no caller-facing text of its own
            pub fn default_message(&self) -> &'static str {
                match self {
                    $(Self::$variant => $message,)+
                }
            }
        }
    };
}

error_codes! {
    ValidationError = 1001, "VALIDATION_ERROR", "Request validation failed";
    BadRequest = 1002, "BAD_REQUEST", "Bad request";
    InvalidJson = 1003, "INVALID_JSON", "Invalid JSON format";
    NotFound = 1004, "NOT_FOUND", "Resource not found";
    InternalError = 1005, "INTERNAL_ERROR", "An unexpected error occurred";
    Unauthorized = 1006, "UNAUTHORIZED", "User is not authenticated";
    Forbidden = 1007, "FORBIDDEN", "Access forbidden";
    Conflict = 1008, "CONFLICT", "Request conflicts with the current state";
    RouteNotFound = 1009, "ROUTE_NOT_FOUND", "The requested route does not exist";
    ServiceUnavailable = 1011, "SERVICE_UNAVAILABLE", "Service is temporarily unavailable";
    DatabaseError = 2003, "DATABASE_ERROR", "An unexpected error occurred";
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_serialized_name_matches_as_str() {
        for code in ErrorCode::ALL {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
            let back: ErrorCode = serde_json::from_value(json).unwrap();
            assert_eq!(back, *code);
        }
    }

    #[test]
    fn test_numeric_ids_are_unique() {
        let ids: HashSet<i32> = ErrorCode::ALL.iter().map(ErrorCode::code).collect();
        assert_eq!(ids.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_storage_failures_share_the_generic_message() {
        assert_eq!(
            ErrorCode::DatabaseError.default_message(),
            ErrorCode::InternalError.default_message()
        );
    }
}
