// HTTP handlers for authentication endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    service::AuthService,
};
use crate::response::ApiResponse;

/// Turn a body rejection or validation failure into a body-level error
fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected auth request body: {}", rejection.body_text());
        AuthError::ValidationError("Invalid request parameters".to_string())
    })?;

    request.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request parameters".to_string());
        AuthError::ValidationError(message)
    })?;

    Ok(request)
}

/// Login a user
/// POST /v1/auth/login
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "`{success: true, data: LoginResponse}` on success, `{success: false, message}` on bad credentials or body", body = LoginResponse),
        (status = 500, description = "Token could not be issued")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(service): State<Arc<AuthService>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, AuthError> {
    let request = validated(payload)?;
    let response = service.login(&request.username, &request.password).await?;
    Ok(Json(ApiResponse::ok(response)))
}

/// Register a new user
/// POST /v1/auth/register
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 200, description = "`{success: false, message}` when the body is invalid"),
        (status = 409, description = "Username already exists")
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(service): State<Arc<AuthService>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AuthError> {
    let request = validated(payload)?;
    let user = service
        .register(&request.username, &request.password, request.nickname.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// Get current user information (protected endpoint)
/// GET /v1/auth/userinfo
#[utoipa::path(
    get,
    path = "/v1/auth/userinfo",
    responses(
        (status = 200, description = "`{success: true, data: UserResponse}`", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired token, or user no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn userinfo_handler(user: AuthenticatedUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(user.into_inner().into()))
}

/// Logout
/// POST /v1/auth/logout
///
/// Tokens are stateless; the client discards its copy.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses((status = 200, description = "`{success: true, message}`")),
    tag = "auth"
)]
pub async fn logout_handler() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Logged out"))
}
