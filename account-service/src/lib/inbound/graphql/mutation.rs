use async_graphql::Context;
use async_graphql::Object;

use super::errors::graphql_error;
use super::query::request_context;
use super::query::user_service;
use super::types::CreateUserInput;
use super::types::LoginInput;
use super::types::LoginResponseData;
use super::types::UserData;
use crate::domain::access::authorize_access;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register a new user. Only callers holding a valid session may do so.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        data: CreateUserInput,
    ) -> async_graphql::Result<UserData> {
        let requested_by = authorize_access(request_context(ctx)).map_err(graphql_error)?;
        tracing::debug!(requested_by = %requested_by, "createUser");

        let command = data.try_into_command().map_err(graphql_error)?;

        user_service(ctx)?
            .create_user(command)
            .await
            .map(|ref user| user.into())
            .map_err(graphql_error)
    }

    /// Exchange credentials for a session token.
    async fn login(
        &self,
        ctx: &Context<'_>,
        data: LoginInput,
    ) -> async_graphql::Result<LoginResponseData> {
        user_service(ctx)?
            .login(data.into())
            .await
            .map(|ref session| session.into())
            .map_err(graphql_error)
    }
}
