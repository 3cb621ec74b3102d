// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::auth::token::TokenError;
use crate::response::ApiResponse;

/// Authentication and authorization errors
///
/// Body-level login failures (`ValidationError`, `InvalidCredentials`) keep
/// HTTP 200 with `success: false`; gate rejections are 401; internals are 500
/// and never reach the client verbatim.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    // Request errors
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username already exists")]
    UsernameAlreadyExists,

    // Gate rejections
    #[error("Missing authentication token")]
    MissingToken,
    #[error("Token rejected: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("User referenced by token not found")]
    UserNotFound,
    #[error("Insufficient permissions for role '{actual}'")]
    InsufficientPermissions { actual: String },

    // Server faults
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Password hashing error: {0}")]
    PasswordHashError(String),
    #[error("Token generation error: {0}")]
    TokenGenerationError(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::OK,
            AuthError::InvalidCredentials => StatusCode::OK,
            AuthError::UsernameAlreadyExists => StatusCode::CONFLICT,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions { .. } => StatusCode::FORBIDDEN,
            AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::PasswordHashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to clients (no internals, no token failure class)
    pub fn client_message(&self) -> String {
        match self {
            AuthError::ValidationError(msg) => msg.clone(),
            AuthError::InvalidCredentials => "Invalid username or password".to_string(),
            AuthError::UsernameAlreadyExists => "Username already exists".to_string(),
            AuthError::MissingToken => "Unauthorized".to_string(),
            AuthError::InvalidToken(_) => "Invalid or expired token".to_string(),
            AuthError::UserNotFound => "User not found".to_string(),
            AuthError::InsufficientPermissions { .. } => "Insufficient permissions".to_string(),
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError(_)
            | AuthError::TokenGenerationError(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Auth server fault: {}", self);
        } else if status != StatusCode::OK {
            warn!("Auth rejection: {}", self);
        }

        let body = Json(ApiResponse::failure(self.client_message()));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::DatabaseError(err.to_string())
    }
}
