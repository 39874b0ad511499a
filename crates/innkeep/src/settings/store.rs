use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which singleton configuration row a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsType {
    Tax,
    General,
}

impl SettingsType {
    pub const fn label(self) -> &'static str {
        match self {
            SettingsType::Tax => "tax",
            SettingsType::General => "general",
        }
    }
}

/// One persisted configuration row per settings type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub settings_type: SettingsType,
    pub gst_percentage: f64,
    /// Reference to the user who last wrote the record. `None` until the
    /// first explicit update; lazy creation records no updater.
    pub updated_by: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence abstraction so the service can be exercised in isolation.
/// Atomicity of a single upsert is delegated to the backing store; concurrent
/// updates are last-write-wins.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn fetch(
        &self,
        settings_type: SettingsType,
    ) -> Result<Option<SettingsRecord>, StoreError>;
    async fn upsert(&self, record: SettingsRecord) -> Result<SettingsRecord, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}
