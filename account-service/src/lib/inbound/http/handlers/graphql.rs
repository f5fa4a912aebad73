use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Extension;
use axum::Json;

use crate::domain::access::RequestContext;
use crate::inbound::graphql::GraphQLResponseBody;
use crate::inbound::http::router::AppState;

/// Execute one GraphQL request under the caller's resolved identity.
///
/// A body that is not a GraphQL request gets the same masked error shape
/// as any other unexpected failure.
pub async fn graphql(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    payload: Result<Json<async_graphql::Request>, JsonRejection>,
) -> Json<GraphQLResponseBody> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejecting malformed GraphQL request body");
            return Json(GraphQLResponseBody::unknown_error());
        }
    };

    if let Some(operation) = request.operation_name.as_deref() {
        tracing::debug!(
            operation,
            authenticated = context.user_id.is_some(),
            "Executing GraphQL operation"
        );
    }

    let response = state.schema.execute(request.data(context)).await;

    Json(response.into())
}
