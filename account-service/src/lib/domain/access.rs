use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Per-request identity, resolved once from the bearer token at request entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Option<UserId>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

/// Require a verified identity on the request.
///
/// # Errors
/// * `Unauthorized` - No valid token accompanied the request
pub fn authorize_access(context: &RequestContext) -> Result<UserId, UserError> {
    context.user_id.ok_or(UserError::Unauthorized)
}
