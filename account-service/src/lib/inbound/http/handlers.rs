pub mod graphiql;
pub mod graphql;
