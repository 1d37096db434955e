//! Image output - saving generated images to disk with generated filenames

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::media::codec;

/// Writes generated images into a target directory
pub struct ImageWriter {
    base_path: PathBuf,
}

impl ImageWriter {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    async fn ensure_dir(&self) -> Result<()> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path).await?;
            debug!(path = ?self.base_path, "Created output directory");
        }
        Ok(())
    }

    /// Decode a data URI (or bare base64) and write it to disk. The
    /// extension comes from the image's magic bytes, falling back to the
    /// data URI's MIME type.
    pub async fn save_data_url(&self, data_url: &str) -> Result<PathBuf> {
        self.ensure_dir().await?;

        let data = codec::decode(data_url)?;
        let extension = codec::detect_image_format(&data)
            .or_else(|| match codec::mime_from_data_url(data_url) {
                Some("image/png") => Some("png"),
                Some("image/webp") => Some("webp"),
                _ => None,
            })
            .unwrap_or("jpg");

        let filename = format!(
            "studio-{}-{}.{}",
            Utc::now().format("%Y%m%d"),
            &Uuid::new_v4().to_string()[..8],
            extension
        );
        let file_path = self.base_path.join(&filename);

        fs::write(&file_path, &data).await?;
        debug!(path = ?file_path, size = data.len(), "Saved image file");

        Ok(file_path)
    }

    /// Save every image of a reply, returning the written paths.
    pub async fn save_all(&self, data_urls: &[String]) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(data_urls.len());
        for url in data_urls {
            paths.push(self.save_data_url(url).await?);
        }
        Ok(paths)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
