use std::sync::Arc;

use async_graphql::Context;
use async_graphql::Object;
use async_graphql::ID;

use super::errors::graphql_error;
use super::types::UserData;
use super::types::UsersPageData;
use crate::domain::access::authorize_access;
use crate::domain::access::RequestContext;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Liveness probe.
    async fn hello(&self) -> &'static str {
        "Hello, World!"
    }

    /// Fetch a single user with its addresses.
    async fn user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<UserData> {
        authorize_access(request_context(ctx)).map_err(graphql_error)?;

        // An id that cannot name a stored user is reported like a missing one
        let user_id = UserId::from_string(&id)
            .map_err(|_| graphql_error(UserError::NotFound(id.to_string())))?;

        user_service(ctx)?
            .get_user(&user_id)
            .await
            .map(|ref user| user.into())
            .map_err(graphql_error)
    }

    /// Page through users ordered by name.
    async fn users(
        &self,
        ctx: &Context<'_>,
        #[graphql(default_with = "Some(10)")] max_users: Option<i32>,
        #[graphql(default_with = "Some(0)")] skip: Option<i32>,
    ) -> async_graphql::Result<UsersPageData> {
        authorize_access(request_context(ctx)).map_err(graphql_error)?;

        // Unset variables and explicit nulls arrive as None
        let page = PageRequest::new(
            max_users.map_or(PageRequest::DEFAULT_MAX_USERS, i64::from),
            skip.map_or(0, i64::from),
        );

        user_service(ctx)?
            .list_users(page)
            .await
            .map(|ref page| page.into())
            .map_err(graphql_error)
    }
}

pub(super) fn user_service<'a>(
    ctx: &Context<'a>,
) -> async_graphql::Result<&'a Arc<dyn UserServicePort>> {
    ctx.data::<Arc<dyn UserServicePort>>()
}

/// Requests executed without the session middleware are anonymous.
pub(super) fn request_context<'a>(ctx: &Context<'a>) -> &'a RequestContext {
    const ANONYMOUS: &RequestContext = &RequestContext { user_id: None };
    ctx.data_opt::<RequestContext>().unwrap_or(ANONYMOUS)
}
