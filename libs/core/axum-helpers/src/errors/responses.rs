//! Reusable OpenAPI response types for consistent API documentation.

use crate::response::EmptyApiResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "An unexpected error occurred",
        "data": null,
        "status": 500,
        "error": { "code": "INTERNAL_ERROR", "detail": "An unexpected error occurred" }
    })
)]
pub struct InternalServerErrorResponse(pub EmptyApiResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Request validation failed",
        "data": null,
        "status": 400,
        "error": {
            "code": "VALIDATION_ERROR",
            "detail": "Request validation failed",
            "errors": ["name: Product name must be between 1 and 100 characters"]
        }
    })
)]
pub struct BadRequestValidationResponse(pub EmptyApiResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Business rule violated",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Quantity must be greater than zero",
        "data": null,
        "status": 400,
        "error": { "code": "BAD_REQUEST", "detail": "Quantity must be greater than zero" }
    })
)]
pub struct BadRequestResponse(pub EmptyApiResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Product with id 42 not found",
        "data": null,
        "status": 404,
        "error": { "code": "NOT_FOUND", "detail": "Product with id 42 not found" }
    })
)]
pub struct NotFoundResponse(pub EmptyApiResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - Authentication required",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "User is not authenticated",
        "data": null,
        "status": 401,
        "error": { "code": "UNAUTHORIZED", "detail": "User is not authenticated" }
    })
)]
pub struct UnauthorizedResponse(pub EmptyApiResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - Insufficient permissions",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Access forbidden",
        "data": null,
        "status": 403,
        "error": { "code": "FORBIDDEN", "detail": "Access forbidden" }
    })
)]
pub struct ForbiddenResponse(pub EmptyApiResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource state does not allow the operation",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Product with name 'Widget' already exists",
        "data": null,
        "status": 409,
        "error": { "code": "CONFLICT", "detail": "Product with name 'Widget' already exists" }
    })
)]
pub struct ConflictResponse(pub EmptyApiResponse);
