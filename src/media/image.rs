//! Normalized in-memory representation of a user-supplied image

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{AppError, Result};
use crate::media::codec;

/// Image input types accepted from the user
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// A user-selected image, normalized for transport to the gateway.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Raw bytes, base64-encoded
    pub base64: String,
    /// MIME type of the encoded bytes
    pub mime_type: String,
    /// Display name
    pub name: String,
}

impl UploadedImage {
    /// Build from raw bytes, rejecting unsupported image types.
    pub fn from_bytes(data: &[u8], mime_type: &str, name: impl Into<String>) -> Result<Self> {
        if !ACCEPTED_IMAGE_TYPES.contains(&mime_type) {
            return Err(AppError::InvalidRequest(format!(
                "Tipo de imagem não suportado: {}. Use JPEG, PNG ou WEBP.",
                mime_type
            )));
        }
        Ok(Self {
            base64: codec::encode(data),
            mime_type: mime_type.to_string(),
            name: name.into(),
        })
    }

    /// Read an image file from disk. The MIME type is detected from magic
    /// bytes, not from the file extension.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).await?;
        let format = codec::detect_image_format(&data).ok_or_else(|| {
            AppError::InvalidRequest(format!(
                "Não foi possível reconhecer o formato da imagem em {}",
                path.display()
            ))
        })?;
        let mime_type = match format {
            "jpg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            other => {
                return Err(AppError::InvalidRequest(format!(
                    "Tipo de imagem não suportado: image/{}. Use JPEG, PNG ou WEBP.",
                    other
                )))
            }
        };
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("imagem")
            .to_string();
        Self::from_bytes(&data, mime_type, name)
    }

    /// Parse a `data:<mime>;base64,<payload>` URI back into an image.
    pub fn from_data_url(data_url: &str, name: impl Into<String>) -> Result<Self> {
        let mime_type = codec::mime_from_data_url(data_url)
            .ok_or_else(|| AppError::InvalidRequest("Invalid data URL".to_string()))?
            .to_string();
        let payload = data_url
            .split_once(',')
            .map(|(_, p)| p.to_string())
            .ok_or_else(|| AppError::InvalidRequest("Invalid data URL".to_string()))?;
        // Reject malformed payloads up front
        codec::decode(&payload)?;
        Ok(Self {
            base64: payload,
            mime_type,
            name: name.into(),
        })
    }

    /// Render the transport form used across the UI and chat feed.
    pub fn to_data_url(&self) -> String {
        codec::data_url(&self.base64, &self.mime_type)
    }

    /// Decode back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        codec::decode(&self.base64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_BYTES: [u8; 8] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];

    #[test]
    fn test_from_bytes_accepts_supported_types() {
        for mime in ACCEPTED_IMAGE_TYPES {
            assert!(UploadedImage::from_bytes(&JPEG_BYTES, mime, "x").is_ok());
        }
    }

    #[test]
    fn test_from_bytes_rejects_unsupported_type() {
        let err = UploadedImage::from_bytes(&JPEG_BYTES, "image/gif", "x").unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn test_data_url_round_trip() {
        let image = UploadedImage::from_bytes(&JPEG_BYTES, "image/jpeg", "shot.jpg").unwrap();
        let url = image.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let back = UploadedImage::from_data_url(&url, "shot.jpg").unwrap();
        assert_eq!(back.mime_type, "image/jpeg");
        assert_eq!(back.decode().unwrap(), JPEG_BYTES.to_vec());
    }

    #[test]
    fn test_from_data_url_rejects_garbage() {
        assert!(UploadedImage::from_data_url("nonsense", "x").is_err());
        assert!(UploadedImage::from_data_url("data:image/png;base64,!!!", "x").is_err());
    }

    #[tokio::test]
    async fn test_from_file_detects_mime_from_magic_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture.bin");
        tokio::fs::write(&path, JPEG_BYTES).await.unwrap();

        let image = UploadedImage::from_file(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.name, "picture.bin");
    }
}
