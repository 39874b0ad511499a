//! Public contact form pipeline: ordered field validation, templated HTML
//! notifications, and sequential dual-email dispatch.

pub mod dispatcher;
pub mod domain;
pub mod router;
pub mod templates;
pub mod transport;
pub mod validator;

pub use dispatcher::NotificationDispatcher;
pub use domain::ContactSubmission;
pub use router::contact_router;
pub use transport::{MailTransport, OutboundEmail, SmtpMailer, TransportError};
pub use validator::{validate, ValidationError};
