use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use innkeep::contact::{contact_router, MailTransport, NotificationDispatcher};
use innkeep::settings::{settings_router, SettingsService, SettingsStore};
use serde_json::json;

use crate::guard::{require_admin, AdminGuard};
use crate::infra::AppState;
use crate::limit::{enforce_contact_quota, ContactRateLimiter};

/// Compose the public contact route (behind the per-address quota), the admin
/// settings routes (behind the bearer-token guard), and the operational
/// endpoints.
pub(crate) fn api_router<T, S>(
    dispatcher: Arc<NotificationDispatcher<T>>,
    settings: Arc<SettingsService<S>>,
    limiter: Arc<ContactRateLimiter>,
    admin: Arc<AdminGuard>,
) -> Router
where
    T: MailTransport + 'static,
    S: SettingsStore + 'static,
{
    let contact = contact_router(dispatcher)
        .layer(middleware::from_fn_with_state(limiter, enforce_contact_quota));
    let admin_routes = settings_router(settings)
        .layer(middleware::from_fn_with_state(admin, require_admin));

    Router::new()
        .merge(contact)
        .merge(admin_routes)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
