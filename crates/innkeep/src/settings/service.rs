use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::store::{SettingsRecord, SettingsStore, SettingsType, StoreError};

/// GST percentage applied when no tax record exists yet.
pub const DEFAULT_GST_PERCENTAGE: f64 = 18.0;

/// Get/update operations over the singleton tax configuration record.
pub struct SettingsService<S> {
    store: Arc<S>,
}

impl<S> SettingsService<S>
where
    S: SettingsStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Return the tax record, creating and persisting one with the default
    /// rate on first read.
    pub async fn get(&self) -> Result<SettingsRecord, SettingsError> {
        if let Some(record) = self.store.fetch(SettingsType::Tax).await? {
            return Ok(record);
        }

        let record = SettingsRecord {
            settings_type: SettingsType::Tax,
            gst_percentage: DEFAULT_GST_PERCENTAGE,
            updated_by: None,
            updated_at: Utc::now(),
        };
        info!(rate = record.gst_percentage, "seeding default tax settings");
        Ok(self.store.upsert(record).await?)
    }

    /// Replace the tax rate, stamping updater and time. Negative rates are a
    /// client error; zero and above are accepted as-is.
    pub async fn update(
        &self,
        gst_percentage: f64,
        updated_by: &str,
    ) -> Result<SettingsRecord, SettingsError> {
        if gst_percentage < 0.0 {
            return Err(SettingsError::NegativeRate(gst_percentage));
        }

        let record = SettingsRecord {
            settings_type: SettingsType::Tax,
            gst_percentage,
            updated_by: Some(updated_by.to_string()),
            updated_at: Utc::now(),
        };
        Ok(self.store.upsert(record).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("GST percentage cannot be negative (got {0})")]
    NegativeRate(f64),
    #[error(transparent)]
    Store(#[from] StoreError),
}
