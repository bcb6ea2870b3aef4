//! Logo storage. Uploads are validated by sniffing magic bytes (the
//! declared MIME type is not trusted), capped at 5 MB, and written under
//! the uploads directory. Callers that insert a record after storing a
//! file delete the file again if the insert fails.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file is larger than 5 MB")]
    TooLarge,
    #[error("file is empty")]
    Empty,
    #[error("only JPEG, PNG, WebP and GIF images are allowed")]
    UnsupportedType,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::Webp => "webp",
            ImageKind::Gif => "gif",
        }
    }
}

/// Identifies the image format from its leading bytes.
pub fn sniff_image(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageKind::Jpeg)
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(ImageKind::Png)
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some(ImageKind::Webp)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(ImageKind::Gif)
    } else {
        None
    }
}

pub fn validate_logo(bytes: &[u8]) -> Result<ImageKind, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }
    sniff_image(bytes).ok_or(UploadError::UnsupportedType)
}

pub fn uploads_dir() -> PathBuf {
    PathBuf::from(std::env::var("HAVENMAP_UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()))
}

/// Validates and writes the logo, returning the public URL path. The file
/// name is derived from a nanosecond timestamp; collisions would need two
/// uploads in the same nanosecond.
pub fn store_logo(dir: &Path, bytes: &[u8]) -> Result<String, UploadError> {
    let kind = validate_logo(bytes)?;
    std::fs::create_dir_all(dir)?;

    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let file_name = format!("logo-{stamp}.{}", kind.extension());
    std::fs::write(dir.join(&file_name), bytes)?;

    Ok(format!("/uploads/{file_name}"))
}

/// Compensating action for a failed insert after a successful store.
pub fn remove_logo(dir: &Path, logo_url: &str) -> std::io::Result<()> {
    match logo_url.rsplit('/').next() {
        Some(file_name) if !file_name.is_empty() => std::fs::remove_file(dir.join(file_name)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    #[test]
    fn sniffing_known_formats() {
        assert_eq!(sniff_image(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(sniff_image(PNG_HEADER), Some(ImageKind::Png));
        assert_eq!(sniff_image(b"GIF89a......"), Some(ImageKind::Gif));
        assert_eq!(sniff_image(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some(ImageKind::Webp));
        assert_eq!(sniff_image(b"<svg xmlns"), None);
    }

    #[test]
    fn size_limits() {
        assert!(matches!(validate_logo(&[]), Err(UploadError::Empty)));
        let mut huge = vec![0xFF, 0xD8, 0xFF];
        huge.resize(MAX_UPLOAD_BYTES + 1, 0);
        assert!(matches!(validate_logo(&huge), Err(UploadError::TooLarge)));
    }

    #[test]
    fn store_and_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let url = store_logo(dir.path(), PNG_HEADER).unwrap();
        assert!(url.starts_with("/uploads/logo-"));
        assert!(url.ends_with(".png"));

        let file_name = url.rsplit('/').next().unwrap();
        assert!(dir.path().join(file_name).exists());

        remove_logo(dir.path(), &url).unwrap();
        assert!(!dir.path().join(file_name).exists());
    }

    #[test]
    fn unsupported_type_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            store_logo(dir.path(), b"<svg onload=alert(1)>"),
            Err(UploadError::UnsupportedType)
        ));
    }
}
