use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Owns its addresses; the password is only ever held as a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub birth_date: String,
    pub password_hash: String,
    pub addresses: Vec<Address>,
}

/// Store-assigned user identifier (positive integer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i32);

impl UserId {
    /// Parse a user ID from its decimal string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive 32-bit integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.trim().parse::<i32>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(UserIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Postal address owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: i32,
    pub cep: String,
    pub street: String,
    pub street_number: i32,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Address fields supplied at registration, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub cep: String,
    pub street: String,
    pub street_number: i32,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// User row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: EmailAddress,
    pub birth_date: String,
    pub password_hash: String,
    pub addresses: Vec<NewAddress>,
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: String,
    pub email: EmailAddress,
    pub password: String,
    pub birth_date: String,
    pub addresses: Vec<NewAddress>,
}

/// Credentials presented at login.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// How long issued session tokens stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub default_lifetime: Duration,
    pub remember_me_lifetime: Duration,
}

impl SessionPolicy {
    pub fn lifetime(&self, remember_me: bool) -> Duration {
        if remember_me {
            self.remember_me_lifetime
        } else {
            self.default_lifetime
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            default_lifetime: Duration::hours(8),
            remember_me_lifetime: Duration::days(7),
        }
    }
}

/// Offset window over the name-ordered user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub max_users: i64,
    pub skip: i64,
}

impl PageRequest {
    pub const DEFAULT_MAX_USERS: i64 = 10;

    /// Negative values are clamped to zero.
    pub fn new(max_users: i64, skip: i64) -> Self {
        Self {
            max_users: max_users.max(0),
            skip: skip.max(0),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_USERS, 0)
    }
}

/// One page of users plus the flags a client needs to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub total_users: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl UsersPage {
    pub fn new(users: Vec<User>, total_users: i64, request: PageRequest) -> Self {
        Self {
            users,
            total_users,
            has_next_page: request.skip + request.max_users < total_users,
            has_previous_page: request.skip > 0,
        }
    }
}
