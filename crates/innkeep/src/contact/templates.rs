use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::domain::ContactSubmission;
use super::transport::OutboundEmail;

/// Confirmation copy returned to the guest and repeated in the
/// acknowledgment email.
pub const ACKNOWLEDGMENT_COPY: &str =
    "Thank you for reaching out. Our front desk will get back to you within 24 hours.";

/// Operator-facing notice summarizing one submission. Guest-supplied text is
/// escaped; message newlines become line breaks.
pub fn admin_notice(
    submission: &ContactSubmission,
    admin_address: &str,
    received_at: DateTime<Utc>,
) -> OutboundEmail {
    let mut html = String::new();
    writeln!(html, "<h2>New contact form submission</h2>").expect("write heading");
    writeln!(
        html,
        "<p><strong>Name:</strong> {}</p>",
        escape_html(&submission.name)
    )
    .expect("write name");
    writeln!(
        html,
        "<p><strong>Email:</strong> <a href=\"mailto:{0}\">{0}</a></p>",
        escape_html(&submission.email)
    )
    .expect("write email");
    writeln!(
        html,
        "<p><strong>Phone:</strong> <a href=\"tel:{0}\">{0}</a></p>",
        escape_html(&submission.phone)
    )
    .expect("write phone");
    writeln!(
        html,
        "<p><strong>Subject:</strong> {}</p>",
        escape_html(&submission.subject)
    )
    .expect("write subject");
    writeln!(
        html,
        "<p><strong>Message:</strong></p><p>{}</p>",
        multiline_html(&submission.message)
    )
    .expect("write message");
    writeln!(
        html,
        "<hr><p><em>Received {}</em></p>",
        received_at.format("%B %d, %Y at %H:%M UTC")
    )
    .expect("write footer");

    OutboundEmail {
        to: admin_address.to_string(),
        subject: format!("Contact form: {}", submission.subject),
        html_body: html,
    }
}

/// Guest-facing acknowledgment restating what was submitted, with the
/// front-desk phone number and the 24-hour response promise.
pub fn guest_acknowledgment(
    submission: &ContactSubmission,
    front_desk_phone: &str,
) -> OutboundEmail {
    let mut html = String::new();
    writeln!(html, "<h2>We received your message</h2>").expect("write heading");
    writeln!(
        html,
        "<p>Dear {},</p>",
        escape_html(&submission.name)
    )
    .expect("write greeting");
    writeln!(html, "<p>{}</p>", ACKNOWLEDGMENT_COPY).expect("write promise");
    writeln!(
        html,
        "<p><strong>Your subject:</strong> {}</p>",
        escape_html(&submission.subject)
    )
    .expect("write subject");
    writeln!(
        html,
        "<p><strong>Your message:</strong></p><p>{}</p>",
        multiline_html(&submission.message)
    )
    .expect("write message");
    writeln!(
        html,
        "<p>If your request is urgent, call us at {}.</p>",
        escape_html(front_desk_phone)
    )
    .expect("write phone");

    OutboundEmail {
        to: submission.email.clone(),
        subject: "We received your message".to_string(),
        html_body: html,
    }
}

fn multiline_html(raw: &str) -> String {
    escape_html(raw).replace('\n', "<br>")
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
