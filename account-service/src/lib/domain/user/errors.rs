use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Password strength rule violations, checked in declaration order.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters long.")]
    TooShort { min: usize },

    #[error("Password must contain at least one letter.")]
    MissingLetter,

    #[error("Password must contain at least one number.")]
    MissingDigit,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Validation errors
    #[error("{0}")]
    WeakPassword(#[from] PasswordPolicyError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("User not found with email: {0}")]
    EmailNotFound(String),

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Request is not authenticated")]
    Unauthorized,

    #[error("User not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Caller-facing classification of a [`UserError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPassword,
    InvalidEmail,
    Unauthorized,
    NotFound,
    UnknownError,
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::WeakPassword(_) | UserError::IncorrectPassword => ErrorKind::InvalidPassword,
            UserError::InvalidEmail(_)
            | UserError::EmailAlreadyExists(_)
            | UserError::EmailNotFound(_) => ErrorKind::InvalidEmail,
            UserError::Unauthorized => ErrorKind::Unauthorized,
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::DatabaseError(_) | UserError::Unknown(_) => ErrorKind::UnknownError,
        }
    }
}
