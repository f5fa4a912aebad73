//! Credential and session-token utilities.
//!
//! Provides the building blocks the account service composes:
//! - Password hashing (Argon2id)
//! - Signed, time-limited session tokens (HS256 JWT)
//! - An authenticator tying both together
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("password123").unwrap();
//! assert!(hasher.verify("password123", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user(42, Duration::hours(8));
//! let token = handler.encode(&claims).unwrap();
//! assert_eq!(handler.decode(&token).unwrap().id, 42);
//! ```
//!
//! ## Complete Login Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Registration stores only the hash
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login checks the password, then issues a token
//! auth.verify_password("password123", &hash).unwrap();
//! let issued = auth.issue_token(42, Duration::days(7)).unwrap();
//!
//! // Later requests carry the token
//! let claims = auth.validate_token(&issued.access_token).unwrap();
//! assert_eq!(claims.id, 42);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
