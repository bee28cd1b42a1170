use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;
use uuid::Uuid;

use super::resolve_context;
use crate::app::AppState;

/// Resolve the caller's [`RequestContext`](super::RequestContext) and stash it in
/// the request extensions for the GraphQL handler.
///
/// A missing or malformed `authorization` header is not an error; only store
/// failures abort the request.
pub async fn context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let request_id = Uuid::new_v4();
    let span = tracing::debug_span!("request", %request_id);

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let context = resolve_context(&state.pool, header)
        .instrument(span.clone())
        .await
        .map_err(|e| {
            tracing::error!(%request_id, "Failed to resolve request context: {}", e);
            e.into_response()
        })?;

    match context.email() {
        Some(email) => tracing::debug!(%request_id, user = %email, "Authenticated request"),
        None => tracing::debug!(%request_id, "Anonymous request"),
    }

    request.extensions_mut().insert(context);
    Ok(next.run(request).instrument(span).await)
}
