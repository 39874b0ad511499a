use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

/// Bearer-token check for the `/admin` surface. When no token is configured
/// the admin endpoints reject every caller rather than opening up.
pub(crate) struct AdminGuard {
    pub(crate) token: Option<String>,
}

pub(crate) async fn require_admin(
    State(guard): State<Arc<AdminGuard>>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let authorized = match (&guard.token, presented) {
        (Some(expected), Some(presented)) => expected == presented,
        _ => false,
    };

    if authorized {
        return next.run(request).await;
    }

    warn!("unauthorized admin request rejected");
    let payload = json!({ "error": "administrator authorization required" });
    (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
}
