// Authentication service - business logic layer

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::auth::{
    error::AuthError,
    models::{LoginResponse, NewUser, User, UserResponse, DEFAULT_ROLE},
    password::PasswordService,
    repository::UserStore,
    token::TokenService,
};

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication service coordinating the credential store, password
/// verification and token handling
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        // Build the stand-in verifier now rather than on the first unknown login
        PasswordService::dummy_verifier();
        Self { users, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verify credentials and issue a token
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self.users.find_by_username(username).await?;
        let verified = PasswordService::verify_or_dummy(
            password,
            user.as_ref().map(|u| u.password_hash.as_str()),
        );

        let user = match user {
            Some(user) if verified => user,
            Some(user) => {
                warn!("Login failed: password mismatch for user_id={}", user.id);
                return Err(AuthError::InvalidCredentials);
            }
            None => {
                warn!("Login failed: unknown username");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(&user)?;

        info!("User logged in: user_id={}, role={}", user.id, user.role);
        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    /// Register a new user with the default role
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        nickname: Option<&str>,
    ) -> Result<UserResponse, AuthError> {
        let password_hash = PasswordService::hash_password(password)?;
        let new_user = NewUser::new(username, password_hash)
            .with_nickname(nickname.unwrap_or(username))
            .with_role(DEFAULT_ROLE);

        let user = self.users.create(new_user).await?;
        info!("User registered: user_id={}", user.id);
        Ok(user.into())
    }

    /// Resolve the caller behind an `Authorization` header value
    ///
    /// The user is re-read from the store on every call so role and profile
    /// changes made after issuance apply immediately.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<User, AuthError> {
        let raw = authorization.unwrap_or_default();
        let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw);
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = self.tokens.validate(token)?;

        let user = self.users.find_by_id(claims.user_id).await?.ok_or_else(|| {
            warn!("Token for user_id={} refers to a user that no longer exists", claims.user_id);
            AuthError::UserNotFound
        })?;

        debug!("Authenticated user_id={}, role={}", user.id, user.role);
        Ok(user)
    }
}
