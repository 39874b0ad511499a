use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::ContactSubmission;
use super::templates;
use super::transport::{MailTransport, TransportError};

/// Composes the operator notice and guest acknowledgment for one validated
/// submission and hands them to the mail transport, admin first. The first
/// failure aborts the pair; a delivered admin notice is not recalled when the
/// guest copy fails, so partial delivery is an externally visible outcome.
pub struct NotificationDispatcher<T> {
    transport: Arc<T>,
    admin_address: String,
    front_desk_phone: String,
}

impl<T> NotificationDispatcher<T>
where
    T: MailTransport + 'static,
{
    pub fn new(
        transport: Arc<T>,
        admin_address: impl Into<String>,
        front_desk_phone: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            admin_address: admin_address.into(),
            front_desk_phone: front_desk_phone.into(),
        }
    }

    /// Send both notifications sequentially. Overall success requires both;
    /// there is no retry at this layer.
    pub async fn dispatch(&self, submission: &ContactSubmission) -> Result<(), TransportError> {
        let received_at = Utc::now();

        let notice = templates::admin_notice(submission, &self.admin_address, received_at);
        self.transport.send(&notice).await?;

        let acknowledgment =
            templates::guest_acknowledgment(submission, &self.front_desk_phone);
        self.transport.send(&acknowledgment).await?;

        info!(guest = %submission.email, "contact notifications delivered");
        Ok(())
    }
}
