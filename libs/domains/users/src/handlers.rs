use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, RequestContext, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, Role, UserProfile};
use crate::repository::UserRepository;
use crate::service::AuthService;

const TAG: &str = "Auth";

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(register, login, me),
    components(
        schemas(RegisterRequest, LoginRequest, AuthResponse, UserProfile, Role),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and the current user")
    )
)]
pub struct ApiDoc;

/// Create the auth router.
///
/// `/me` reads the identity attached by the JWT middleware, so the router must
/// sit inside `optional_jwt_auth_middleware`.
pub fn router<R: UserRepository + 'static>(service: AuthService<R>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(Arc::new(service))
}

/// Register a new user and return a session token
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = RegisterRequest,
    security(()),
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<ApiResponse<AuthResponse>> {
    let response = service.register(input).await?;
    Ok(ApiResponse::created(response, "User registered successfully"))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    security(()),
    responses(
        (status = 200, description = "User logged in successfully", body = ApiResponse<AuthResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<ApiResponse<AuthResponse>> {
    let response = service.login(input).await?;
    Ok(ApiResponse::success(
        StatusCode::OK,
        Some(response),
        "User logged in successfully",
    ))
}

/// Profile of the authenticated caller
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User fetched successfully", body = ApiResponse<UserProfile>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ctx: RequestContext,
) -> UserResult<ApiResponse<UserProfile>> {
    let profile = service.current_user(ctx.user_id::<i32>()).await?;
    Ok(ApiResponse::ok(profile, "User fetched successfully"))
}
