// Auth gate: request extractor for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::warn;

use crate::auth::{error::AuthError, models::User, service::AuthService, token::TokenError};

/// Caller resolved by the auth gate
///
/// Add `user: AuthenticatedUser` to a handler to require a valid bearer
/// token. The wrapped record is read from the store on every request, not
/// copied out of the token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_inner(self) -> User {
        self.0
    }

    /// Require the caller's current role to be one of `roles`
    pub fn require_any_role(&self, roles: &[&str]) -> Result<(), AuthError> {
        if roles.contains(&self.0.role.as_str()) {
            Ok(())
        } else {
            warn!(
                "Authorization failed: user_id={}, role={}, allowed={:?}",
                self.0.id, self.0.role, roles
            );
            Err(AuthError::InsufficientPermissions {
                actual: self.0.role.clone(),
            })
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = match parts.headers.get(header::AUTHORIZATION) {
            None => None,
            Some(value) => Some(value.to_str().map_err(|_| {
                warn!("Authorization header is not valid UTF-8: {}", parts.uri.path());
                AuthError::InvalidToken(TokenError::Malformed)
            })?),
        };

        let service = Arc::<AuthService>::from_ref(state);
        let user = service.authenticate(header_value).await?;
        Ok(AuthenticatedUser(user))
    }
}
