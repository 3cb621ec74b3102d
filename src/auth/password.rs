// Password hashing and verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use std::sync::OnceLock;

use crate::auth::error::AuthError;

/// Plaintext behind the stand-in verifier used for unknown usernames
const DUMMY_PASSWORD: &str = "blog-cms-unknown-user";

/// Password service for hashing and verification
///
/// Verifiers are Argon2id PHC strings: each carries its own random salt and
/// cost parameters, so nothing secret is shared across records.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a fresh salt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))
    }

    /// Verify a password against a stored verifier
    ///
    /// An unparseable verifier is treated as a mismatch.
    pub fn verify_password(password: &str, verifier: &str) -> bool {
        match PasswordHash::new(verifier) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password verifier could not be parsed: {}", e);
                false
            }
        }
    }

    /// Verify against `verifier`, or against a stand-in verifier when the user
    /// does not exist
    ///
    /// Both branches cost one Argon2 verification with the same parameters,
    /// so response time does not reveal whether a username is registered.
    /// The `None` branch always returns false.
    pub fn verify_or_dummy(password: &str, verifier: Option<&str>) -> bool {
        match verifier {
            Some(verifier) => Self::verify_password(password, verifier),
            None => {
                if let Some(dummy) = Self::dummy_verifier() {
                    Self::verify_password(password, dummy);
                }
                false
            }
        }
    }

    /// Stand-in verifier, hashed once per process with the default parameters
    pub fn dummy_verifier() -> Option<&'static str> {
        static DUMMY_VERIFIER: OnceLock<Option<String>> = OnceLock::new();
        DUMMY_VERIFIER
            .get_or_init(|| match Self::hash_password(DUMMY_PASSWORD) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    tracing::error!("Could not build the stand-in password verifier: {}", e);
                    None
                }
            })
            .as_deref()
    }
}
