//! Media upload adapter streaming binary buffers into object storage under a
//! deterministic folder/name convention.

pub mod cloudinary;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use cloudinary::{public_id_from_url, CloudinaryClient};

/// A stored media object addressed by its storage identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub public_id: String,
    pub secure_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("object storage request failed: {0}")]
    Transport(String),
    #[error("object storage rejected the request: {0}")]
    Backend(String),
    #[error("no media identifier present in '{0}'")]
    MalformedUrl(String),
}

/// Object storage collaborator for uploaded media.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        file_name: &str,
    ) -> Result<MediaAsset, MediaError>;

    async fn delete(&self, public_id: &str) -> Result<(), MediaError>;
}

/// Delete a stored object given the secure URL previously returned by
/// `upload`. Malformed URLs surface as `MalformedUrl` without touching the
/// backing store.
pub async fn delete_by_url<S>(storage: &S, url: &str) -> Result<(), MediaError>
where
    S: MediaStorage + ?Sized,
{
    match public_id_from_url(url) {
        Some(public_id) => storage.delete(&public_id).await,
        None => Err(MediaError::MalformedUrl(url.to_string())),
    }
}
