//! Base64 encoding and decoding utilities

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

/// Encode binary data to base64 string
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode base64 string to binary data
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    // Handle data URL format (e.g., "data:image/png;base64,...")
    let data = if encoded.contains(',') {
        encoded.split(',').last().unwrap_or(encoded)
    } else {
        encoded
    };

    STANDARD
        .decode(data.trim())
        .map_err(|e| AppError::InvalidRequest(format!("Invalid base64 data: {}", e)))
}

/// Get the MIME type from a data URL prefix
pub fn mime_from_data_url(data_url: &str) -> Option<&str> {
    if data_url.starts_with("data:") {
        let end = data_url.find(';')?;
        Some(&data_url[5..end])
    } else {
        None
    }
}

/// Create a data URL from base64 payload and MIME type
pub fn data_url(base64_payload: &str, mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_payload)
}

/// Detect image format from binary data using magic bytes
pub fn detect_image_format(data: &[u8]) -> Option<&'static str> {
    if data.len() < 8 {
        return None;
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("png");
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("jpg");
    }

    // WebP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("webp");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let original = b"Hello, World!";
        let encoded = encode(original);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(original.as_slice(), decoded.as_slice());
    }

    #[test]
    fn test_data_url_decode() {
        let url = "data:image/png;base64,SGVsbG8sIFdvcmxkIQ==";
        let decoded = decode(url).unwrap();
        assert_eq!(b"Hello, World!", decoded.as_slice());
    }

    #[test]
    fn test_mime_from_data_url() {
        assert_eq!(mime_from_data_url("data:image/png;base64,abc"), Some("image/png"));
        assert_eq!(mime_from_data_url("data:image/jpeg;base64,abc"), Some("image/jpeg"));
        assert_eq!(mime_from_data_url("not a data url"), None);
    }

    #[test]
    fn test_detect_png() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_image_format(&png_header), Some("png"));
    }

    #[test]
    fn test_detect_jpeg() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(detect_image_format(&jpeg_header), Some("jpg"));
    }
}
