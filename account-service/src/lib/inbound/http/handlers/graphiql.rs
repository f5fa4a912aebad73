use async_graphql::http::GraphiQLSource;
use axum::response::Html;

/// Interactive GraphiQL page pointed at the local endpoint.
pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
