use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Serialized as `{ "id": <user id>, "iat": <unix seconds>, "exp": <unix seconds> }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the authenticated user
    pub id: i32,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Claims for `user_id` issued now and valid for `lifetime`.
    pub fn for_user(user_id: i32, lifetime: Duration) -> Self {
        Self::issued_at(user_id, Utc::now(), lifetime)
    }

    /// Claims for `user_id` issued at an explicit instant.
    pub fn issued_at(user_id: i32, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            id: user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
