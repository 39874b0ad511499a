use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::service::{SettingsError, SettingsService};
use super::store::SettingsStore;

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateSettingsRequest {
    pub(crate) gst_percentage: f64,
    pub(crate) updated_by: String,
}

/// Router exposing the tax settings record. Callers are expected to sit
/// behind the admin guard installed by the service binary.
pub fn settings_router<S>(service: Arc<SettingsService<S>>) -> Router
where
    S: SettingsStore + 'static,
{
    Router::new()
        .route(
            "/admin/settings",
            get(get_settings::<S>).put(put_settings::<S>),
        )
        .with_state(service)
}

pub(crate) async fn get_settings<S>(
    State(service): State<Arc<SettingsService<S>>>,
) -> Response
where
    S: SettingsStore + 'static,
{
    match service.get().await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => {
            error!(%err, "failed to load tax settings");
            let payload = json!({ "error": "failed to load settings" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn put_settings<S>(
    State(service): State<Arc<SettingsService<S>>>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Response
where
    S: SettingsStore + 'static,
{
    match service
        .update(request.gst_percentage, &request.updated_by)
        .await
    {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err @ SettingsError::NegativeRate(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(err) => {
            error!(%err, "failed to update tax settings");
            let payload = json!({ "error": "failed to update settings" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
