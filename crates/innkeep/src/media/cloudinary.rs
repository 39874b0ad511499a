use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::CloudinaryConfig;

use super::{MediaAsset, MediaError, MediaStorage};

/// REST client for Cloudinary's image API using signed requests.
pub struct CloudinaryClient {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryClient {
    pub fn new(config: &CloudinaryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{}",
            self.cloud_name, action
        )
    }

    /// Request signature: SHA-256 over the sorted `key=value` pairs joined
    /// with `&`, with the API secret appended.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted = params.to_vec();
        sorted.sort();
        let joined = sorted
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl std::fmt::Debug for CloudinaryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryClient")
            .field("cloud_name", &self.cloud_name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MediaStorage for CloudinaryClient {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        file_name: &str,
    ) -> Result<MediaAsset, MediaError> {
        let public_id = public_id_for(folder, file_name);
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("public_id", public_id.as_str()),
            ("signature_algorithm", "sha256"),
            ("timestamp", timestamp.as_str()),
        ]);

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string()),
            )
            .text("public_id", public_id)
            .text("timestamp", timestamp)
            .text("signature_algorithm", "sha256")
            .text("api_key", self.api_key.clone())
            .text("signature", signature);

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| MediaError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Backend(format!("{status}: {body}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|err| MediaError::Backend(err.to_string()))?;

        Ok(MediaAsset {
            public_id: uploaded.public_id,
            secure_url: uploaded.secure_url,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("public_id", public_id),
            ("signature_algorithm", "sha256"),
            ("timestamp", timestamp.as_str()),
        ]);

        let params = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("signature_algorithm", "sha256"),
            ("api_key", self.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|err| MediaError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Backend(format!("{status}: {body}")));
        }

        let destroyed: DestroyResponse = response
            .json()
            .await
            .map_err(|err| MediaError::Backend(err.to_string()))?;
        if destroyed.result != "ok" {
            return Err(MediaError::Backend(format!(
                "destroy returned '{}' for {public_id}",
                destroyed.result
            )));
        }

        Ok(())
    }
}

/// Deterministic `folder/stem` identifier for an uploaded file.
fn public_id_for(folder: &str, file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    format!("{}/{}", folder.trim_matches('/'), stem)
}

/// Extract the public id from a delivery URL. The expected shape is
/// `https://res.cloudinary.com/<cloud>/image/upload/v<N>/<public_id>.<ext>`;
/// anything else yields `None`.
pub fn public_id_from_url(url: &str) -> Option<String> {
    let (_, after_upload) = url.split_once("/upload/")?;
    let segments: Vec<&str> = after_upload.split('/').collect();

    let start = match segments.first() {
        Some(first)
            if first.len() > 1
                && first.starts_with('v')
                && first[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            1
        }
        _ => 0,
    };

    let remainder = &segments[start..];
    if remainder.is_empty() || remainder.iter().any(|segment| segment.is_empty()) {
        return None;
    }

    let joined = remainder.join("/");
    let public_id = match joined.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => joined,
    };
    if public_id.is_empty() {
        return None;
    }
    Some(public_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_id_round_trips_through_the_delivery_url_shape() {
        let url = "https://res.cloudinary.com/innkeep/image/upload/v1712345678/rooms/garden-suite.jpg";
        assert_eq!(
            public_id_from_url(url).as_deref(),
            Some("rooms/garden-suite")
        );
    }

    #[test]
    fn version_segment_is_optional() {
        let url = "https://res.cloudinary.com/innkeep/image/upload/rooms/garden-suite.jpg";
        assert_eq!(
            public_id_from_url(url).as_deref(),
            Some("rooms/garden-suite")
        );
    }

    #[test]
    fn malformed_urls_yield_no_identifier() {
        for url in [
            "https://example.com/not-cloudinary/garden-suite.jpg",
            "https://res.cloudinary.com/innkeep/image/upload/",
            "https://res.cloudinary.com/innkeep/image/upload/v123//suite.jpg",
            "",
        ] {
            assert_eq!(public_id_from_url(url), None, "{url}");
        }
    }

    #[test]
    fn upload_identifiers_are_deterministic() {
        assert_eq!(public_id_for("rooms", "garden-suite.jpg"), "rooms/garden-suite");
        assert_eq!(public_id_for("/rooms/", "garden-suite.jpg"), "rooms/garden-suite");
        assert_eq!(public_id_for("rooms", "no-extension"), "rooms/no-extension");
    }
}
