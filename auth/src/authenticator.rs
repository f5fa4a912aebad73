use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Coordinates password verification and session token issuing.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator signing with `jwt_secret`.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Sign a token for `user_id` that expires after `lifetime`.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, user_id: i32, lifetime: Duration) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_user(user_id, lifetime);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_at: claims.expires_at(),
        })
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, badly signed or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
