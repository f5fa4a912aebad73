use std::sync::Arc;

use async_graphql::EmptySubscription;
use async_graphql::Schema;

use super::mutation::MutationRoot;
use super::query::QueryRoot;
use crate::domain::user::ports::UserServicePort;

pub type AccountSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema around an injected user service.
pub fn build_schema(user_service: Arc<dyn UserServicePort>) -> AccountSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(user_service)
        .finish()
}
