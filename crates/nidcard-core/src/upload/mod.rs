//! Image hosting upload collaborator.

mod imgbb;

pub use imgbb::ImgbbUploader;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::UploadError;
use crate::pdf::ExtractedImage;

/// Result type for upload operations.
pub type Result<T> = std::result::Result<T, UploadError>;

/// Trait for image hosting implementations.
#[async_trait]
pub trait ImageUploader {
    /// Upload one image and return its public URL.
    async fn upload(&self, image: &ExtractedImage) -> Result<String>;
}

/// Upload every image, keeping the URLs that succeed.
///
/// A failed upload is logged and its image omitted; partial success is the
/// norm here, not an exception.
pub async fn upload_all(uploader: &dyn ImageUploader, images: &[ExtractedImage]) -> Vec<String> {
    let mut urls = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        match uploader.upload(image).await {
            Ok(url) => {
                debug!("uploaded image {}/{}: {url}", i + 1, images.len());
                urls.push(url);
            }
            Err(e) => warn!("failed to upload image {}/{}: {e}", i + 1, images.len()),
        }
    }
    urls
}
