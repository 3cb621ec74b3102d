// Error type for category endpoints and the persistence layer

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::auth::AuthError;

/// Failures raised while serving category requests
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(#[from] validator::ValidationErrors),

    /// Well-formed request that breaks a category rule (unknown parent, cycle)
    #[error("{0}")]
    BadRequest(String),

    /// Body that is not JSON or does not fit the request type
    #[error("invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("invalid path parameter: {}", .0.body_text())]
    InvalidPath(#[from] PathRejection),

    #[error("{resource} with id {id} not found")]
    NotFound { resource: String, id: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Rejection from the auth gate or role check, passed through unchanged
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Error body: the `{success: false, message}` envelope plus a machine-readable code
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::InvalidPath(rejection) => rejection.status(),
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Body-level auth failures (200) never reach category routes as success
            ApiError::Auth(err) => match err.status_code() {
                StatusCode::OK => StatusCode::BAD_REQUEST,
                status => status,
            },
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::BadRequest(_) | ApiError::InvalidPath(_) => "BAD_REQUEST",
            ApiError::InvalidBody(_) => "INVALID_BODY",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Conflict { .. } => "CONFLICT",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Auth(err) => match err.status_code() {
                StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
                StatusCode::FORBIDDEN => "FORBIDDEN",
                status if status.is_server_error() => "INTERNAL_ERROR",
                _ => "BAD_REQUEST",
            },
        }
    }

    /// Message safe to show clients; server faults are reduced to a generic line
    fn client_message(&self) -> String {
        match self {
            ApiError::Database(_) => "A database error occurred".to_string(),
            ApiError::Auth(err) => err.client_message(),
            other => other.to_string(),
        }
    }

    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {:?}", self);
        } else if matches!(self, ApiError::Conflict { .. } | ApiError::Auth(_)) {
            warn!("Request rejected: {}", self);
        } else {
            debug!("Request rejected: {}", self);
        }

        let details = match self {
            ApiError::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        let body = ErrorResponse {
            success: false,
            error_code: self.error_code(),
            message: self.client_message(),
            details,
            timestamp: Utc::now().to_rfc3339(),
        };
        (status, body)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_error_response();
        (status, Json(body)).into_response()
    }
}
