use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use innkeep::contact::{
    contact_router, ContactSubmission, MailTransport, NotificationDispatcher, OutboundEmail,
    TransportError,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureMode {
    None,
    AuthOnFirst,
    ConnectionOnSecond,
}

struct FakeTransport {
    sent: Mutex<Vec<OutboundEmail>>,
    mode: FailureMode,
}

impl FakeTransport {
    fn new(mode: FailureMode) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            mode,
        }
    }

    fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("sent mutex poisoned").clone()
    }
}

#[async_trait]
impl MailTransport for FakeTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), TransportError> {
        let mut guard = self.sent.lock().expect("sent mutex poisoned");
        match self.mode {
            FailureMode::AuthOnFirst => {
                Err(TransportError::Auth("535 5.7.8 bad credentials".to_string()))
            }
            FailureMode::ConnectionOnSecond if guard.len() == 1 => Err(
                TransportError::Connection("connection reset by relay".to_string()),
            ),
            _ => {
                guard.push(email.clone());
                Ok(())
            }
        }
    }
}

const ADMIN_ADDRESS: &str = "frontdesk@innkeep.example";
const FRONT_DESK_PHONE: &str = "+1 (555) 010-4477";

fn pipeline(mode: FailureMode) -> (Arc<FakeTransport>, axum::Router) {
    let transport = Arc::new(FakeTransport::new(mode));
    let dispatcher = Arc::new(NotificationDispatcher::new(
        transport.clone(),
        ADMIN_ADDRESS,
        FRONT_DESK_PHONE,
    ));
    (transport, contact_router(dispatcher))
}

fn jane_doe() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "9876543210",
        "subject": "Booking question",
        "message": "I would like to ask about availability next week.",
    })
}

fn contact_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("body is json")
}

#[tokio::test]
async fn valid_submission_dispatches_both_emails_and_acknowledges() {
    let (transport, app) = pipeline(FailureMode::None);

    let response = app
        .oneshot(contact_request(&jane_doe()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .expect("message present")
        .contains("within 24 hours"));

    let sent = transport.sent();
    assert_eq!(sent.len(), 2, "admin notice then guest acknowledgment");
    assert_eq!(sent[0].to, ADMIN_ADDRESS);
    assert_eq!(sent[0].subject, "Contact form: Booking question");
    assert_eq!(sent[1].to, "jane@example.com");
    assert!(sent[1].html_body.contains(FRONT_DESK_PHONE));
}

#[tokio::test]
async fn missing_fields_are_rejected_before_any_send() {
    let (transport, app) = pipeline(FailureMode::None);

    let mut body = jane_doe();
    body["email"] = json!("");
    let response = app
        .oneshot(contact_request(&body))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "all fields are required");
    assert_eq!(body["field"], "form");
    assert!(transport.sent().is_empty(), "no mail may be attempted");
}

#[tokio::test]
async fn validation_reports_the_specific_broken_rule() {
    let (transport, app) = pipeline(FailureMode::None);

    let mut body = jane_doe();
    body["phone"] = json!("987654321");
    let response = app
        .oneshot(contact_request(&body))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["field"], "phone");
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn auth_failure_reports_the_auth_message_and_skips_the_second_send() {
    let (transport, app) = pipeline(FailureMode::AuthOnFirst);

    let response = app
        .oneshot(contact_request(&jane_doe()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(
        body["error"],
        "Email service authentication failed. Please try again later."
    );
    assert!(transport.sent().is_empty(), "first send failed, none after");
}

#[tokio::test]
async fn connection_failure_after_admin_notice_leaves_partial_delivery() {
    let (transport, app) = pipeline(FailureMode::ConnectionOnSecond);

    let response = app
        .oneshot(contact_request(&jane_doe()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(
        body["error"],
        "Unable to connect to the email service. Please try again later."
    );

    let sent = transport.sent();
    assert_eq!(sent.len(), 1, "admin notice was already delivered");
    assert_eq!(sent[0].to, ADMIN_ADDRESS);
}

#[tokio::test]
async fn dispatcher_sends_admin_notice_before_guest_acknowledgment() {
    let transport = Arc::new(FakeTransport::new(FailureMode::None));
    let dispatcher =
        NotificationDispatcher::new(transport.clone(), ADMIN_ADDRESS, FRONT_DESK_PHONE);

    let submission = ContactSubmission {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "9876543210".to_string(),
        subject: "Booking question".to_string(),
        message: "I would like to ask about availability next week.".to_string(),
    };

    dispatcher
        .dispatch(&submission)
        .await
        .expect("both sends succeed");

    let sent = transport.sent();
    assert_eq!(sent[0].to, ADMIN_ADDRESS);
    assert_eq!(sent[1].to, submission.email);
}
