use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, warn};

use super::dispatcher::NotificationDispatcher;
use super::domain::ContactSubmission;
use super::templates::ACKNOWLEDGMENT_COPY;
use super::transport::{MailTransport, TransportError};
use super::validator;

/// Router exposing the public contact form endpoint. Rate limiting is the
/// caller's concern; the service binary installs it in front of this route.
pub fn contact_router<T>(dispatcher: Arc<NotificationDispatcher<T>>) -> Router
where
    T: MailTransport + 'static,
{
    Router::new()
        .route("/contact", post(submit_contact::<T>))
        .with_state(dispatcher)
}

pub(crate) async fn submit_contact<T>(
    State(dispatcher): State<Arc<NotificationDispatcher<T>>>,
    Json(submission): Json<ContactSubmission>,
) -> Response
where
    T: MailTransport + 'static,
{
    let submission = match validator::validate(&submission) {
        Ok(valid) => valid,
        Err(error) => {
            warn!(field = error.field(), %error, "contact submission rejected");
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match dispatcher.dispatch(&submission).await {
        Ok(()) => {
            let payload = json!({ "message": ACKNOWLEDGMENT_COPY });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => {
            error!(%error, "contact notification dispatch failed");
            let payload = json!({ "error": client_copy(&error) });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Generic retry-later copy per transport failure class. The classified
/// detail stays in server logs and never reaches the guest.
fn client_copy(error: &TransportError) -> &'static str {
    match error {
        TransportError::Auth(_) => {
            "Email service authentication failed. Please try again later."
        }
        TransportError::Connection(_) => {
            "Unable to connect to the email service. Please try again later."
        }
        TransportError::Other(_) => "Failed to send message. Please try again later.",
    }
}
