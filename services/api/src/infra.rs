use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use innkeep::settings::{SettingsRecord, SettingsStore, SettingsType, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local settings store. The trait leaves room for a document-store
/// backing; a single-instance deployment only needs this map.
#[derive(Default)]
pub(crate) struct InMemorySettingsStore {
    records: Mutex<HashMap<SettingsType, SettingsRecord>>,
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn fetch(
        &self,
        settings_type: SettingsType,
    ) -> Result<Option<SettingsRecord>, StoreError> {
        let guard = self.records.lock().expect("settings mutex poisoned");
        Ok(guard.get(&settings_type).cloned())
    }

    async fn upsert(&self, record: SettingsRecord) -> Result<SettingsRecord, StoreError> {
        let mut guard = self.records.lock().expect("settings mutex poisoned");
        guard.insert(record.settings_type, record.clone());
        Ok(record)
    }
}
