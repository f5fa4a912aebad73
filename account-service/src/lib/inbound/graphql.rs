//! GraphQL surface of the account service.
//!
//! Resolvers authorize through the typed [`RequestContext`] attached to each
//! request, delegate to the injected [`UserServicePort`], and convert domain
//! errors into GraphQL errors only at this boundary.
//!
//! [`RequestContext`]: crate::domain::access::RequestContext
//! [`UserServicePort`]: crate::domain::user::ports::UserServicePort

pub mod errors;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use errors::GraphQLResponseBody;
pub use schema::build_schema;
pub use schema::AccountSchema;
