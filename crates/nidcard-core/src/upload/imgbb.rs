//! ImgBB hosting service client.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

use super::{ImageUploader, Result};
use crate::error::UploadError;
use crate::models::config::UploadConfig;
use crate::pdf::ExtractedImage;

/// Uploader posting images to the ImgBB API.
///
/// The API key comes from the config file or the `NIDCARD_IMGBB_KEY`
/// environment variable; it is never baked into the binary.
pub struct ImgbbUploader {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl ImgbbUploader {
    pub fn from_config(config: &UploadConfig) -> Result<Self> {
        let api_key = config.resolve_api_key().ok_or(UploadError::MissingApiKey)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl ImageUploader for ImgbbUploader {
    async fn upload(&self, image: &ExtractedImage) -> Result<String> {
        debug!(
            "uploading {}x{} {} image ({} bytes)",
            image.width,
            image.height,
            image.format,
            image.data.len()
        );

        let form = reqwest::multipart::Form::new().text("image", BASE64.encode(&image.data));

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        body.pointer("/data/url")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(UploadError::MissingUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> UploadConfig {
        UploadConfig {
            api_key: Some("test-key".to_string()),
            ..UploadConfig::default()
        }
    }

    #[test]
    fn builds_from_config_with_key() {
        let uploader = ImgbbUploader::from_config(&config_with_key()).unwrap();
        assert_eq!(uploader.endpoint, "https://api.imgbb.com/1/upload");
        assert_eq!(uploader.api_key, "test-key");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        let config = UploadConfig {
            endpoint: "http://127.0.0.1:1/upload".to_string(),
            timeout_secs: 1,
            ..config_with_key()
        };
        let uploader = ImgbbUploader::from_config(&config).unwrap();
        let image = ExtractedImage {
            data: vec![0u8; 4],
            width: 1,
            height: 1,
            format: "png".to_string(),
        };
        let err = uploader.upload(&image).await.unwrap_err();
        assert!(matches!(err, UploadError::Request(_)));
    }

    #[tokio::test]
    async fn upload_all_omits_failed_images() {
        let config = UploadConfig {
            endpoint: "http://127.0.0.1:1/upload".to_string(),
            timeout_secs: 1,
            ..config_with_key()
        };
        let uploader = ImgbbUploader::from_config(&config).unwrap();
        let images = vec![ExtractedImage {
            data: vec![0u8; 4],
            width: 1,
            height: 1,
            format: "png".to_string(),
        }];
        let urls = super::super::upload_all(&uploader, &images).await;
        assert!(urls.is_empty());
    }
}
