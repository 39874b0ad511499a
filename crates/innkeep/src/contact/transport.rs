use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;

/// A fully rendered outbound message ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Classified failure from the outbound mail collaborator. The detail string
/// is for server-side logs; callers map variants to generic client copy.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("smtp authentication rejected: {0}")]
    Auth(String),
    #[error("smtp connection failed: {0}")]
    Connection(String),
    #[error("mail transport failure: {0}")]
    Other(String),
}

/// Outbound email collaborator so the dispatcher and handler can be exercised
/// with test doubles.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), TransportError>;
}

/// SMTP transport over lettre's tokio executor, built once at startup and
/// shared across requests.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// STARTTLS relay against the configured host; credentials are optional
    /// so local development can point at an unauthenticated sink.
    pub fn from_config(config: &MailConfig) -> Result<Self, TransportError> {
        let from: Mailbox = config.from_address.parse().map_err(|err| {
            TransportError::Other(format!(
                "invalid sender address '{}': {err}",
                config.from_address
            ))
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|err| TransportError::Connection(err.to_string()))?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), TransportError> {
        let to: Mailbox = email.to.parse().map_err(|err| {
            TransportError::Other(format!("invalid recipient '{}': {err}", email.to))
        })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|err| TransportError::Other(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(classify_smtp_error)
    }
}

/// Map lettre's SMTP error onto the three classes the handler reports on.
/// Authentication rejections (535 and friends) are permanent and actionable
/// by the operator; timeouts and non-response failures read as connectivity.
fn classify_smtp_error(err: lettre::transport::smtp::Error) -> TransportError {
    let detail = err.to_string();
    let lowered = detail.to_ascii_lowercase();
    if lowered.contains("535") || lowered.contains("authentication") || lowered.contains("credential")
    {
        return TransportError::Auth(detail);
    }
    if err.is_timeout() || (!err.is_response() && !err.is_client()) {
        return TransportError::Connection(detail);
    }
    TransportError::Other(detail)
}
