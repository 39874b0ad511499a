//! Singleton tax configuration record: lazily created on first read, mutated
//! only via the update operation, never deleted.

pub mod router;
pub mod service;
pub mod store;

pub use router::settings_router;
pub use service::{SettingsError, SettingsService, DEFAULT_GST_PERCENTAGE};
pub use store::{SettingsRecord, SettingsStore, SettingsType, StoreError};
