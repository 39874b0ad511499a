//! Domain library for the Innkeep guest services backend: the public contact
//! pipeline, tax settings store, document mirror, and media upload adapter.

pub mod config;
pub mod contact;
pub mod error;
pub mod media;
pub mod mirror;
pub mod settings;
pub mod telemetry;
