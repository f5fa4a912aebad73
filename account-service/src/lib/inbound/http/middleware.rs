use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::access::RequestContext;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the bearer token into a [`RequestContext`].
///
/// Never rejects: a missing, malformed or expired token just leaves the
/// context anonymous, and resolvers that need identity refuse on their own.
pub async fn resolve_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let context = match extract_token_from_headers(req.headers()) {
        Some(token) => match state.authenticator.validate_token(token) {
            Ok(claims) => RequestContext::authenticated(UserId(claims.id)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid session token");
                RequestContext::anonymous()
            }
        },
        None => RequestContext::anonymous(),
    };

    req.extensions_mut().insert(context);

    next.run(req).await
}

/// Accepts both `Bearer <token>` and a bare token.
fn extract_token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(http::header::AUTHORIZATION)?.to_str().ok()?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .unwrap_or(auth_str)
        .trim();

    (!token.is_empty()).then_some(token)
}
