//! Disease image attachment
//!
//! Reads image bytes into a data URL for local preview. The image is never
//! transmitted or analyzed; only its presence feeds the disease-detection
//! state of the next analysis run.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("image file is empty")]
    EmptyImage,

    #[error("unrecognized image format (expected PNG, JPEG, GIF or WebP)")]
    UnsupportedFormat,
}

/// A locally previewed crop image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime: &'static str,
    /// `data:<mime>;base64,...` string the preview region binds to.
    pub data_url: String,
}

impl ImageAttachment {
    /// Build an attachment from raw file bytes, sniffing the format from the
    /// magic number.
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self, AttachmentError> {
        if bytes.is_empty() {
            return Err(AttachmentError::EmptyImage);
        }

        let mime = sniff_mime(bytes).ok_or(AttachmentError::UnsupportedFormat)?;
        let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));

        Ok(ImageAttachment {
            file_name: file_name.to_string(),
            mime,
            data_url,
        })
    }
}

/// Identify the image type from its leading bytes.
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
