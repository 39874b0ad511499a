use serde::{Deserialize, Serialize};

/// One guest-supplied request to reach the operator via the public contact
/// form. Transient: it exists only for the duration of the request carrying
/// it and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Copy with surrounding whitespace removed from every field.
    pub(crate) fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}
