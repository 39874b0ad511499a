use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Field payload pushed into the document store for one record.
pub type DocumentFields = BTreeMap<String, FieldValue>;

/// Structured values the mirror knows how to encode for the backing store.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

/// Document store abstraction so the mirror can be exercised in isolation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create or fully replace the document at `collection/id`.
    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), MirrorError>;

    /// Merge the given fields into the document, leaving other fields alone.
    async fn merge(
        &self,
        collection: &str,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), MirrorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("document store operation failed: {0}")]
    Backend(String),
}
