use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Largest accepted image, in bytes
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Why an upload was refused
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("File is not an image")]
    NotAnImage,
    #[error("Image size exceeds 5MB limit")]
    TooLarge,
    #[error("Error reading file")]
    Read,
}

/// A file picked for upload
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, taking the MIME type from its extension
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            warn!("Failed to read {}: {}", path.display(), e);
            UploadError::Read
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(name, mime_from_path(path), bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Where an accepted image can be displayed from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
}

/// Validates an image and turns it into a displayable URL.
///
/// The URL is a base64 data URL; nothing leaves the process.
pub fn process_image_upload(file: &ImageFile) -> Result<UploadedImage, UploadError> {
    if !file.mime_type.starts_with("image/") {
        return Err(UploadError::NotAnImage);
    }

    if file.size() > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge);
    }

    debug!("Accepted {} ({} bytes)", file.name, file.size());

    Ok(UploadedImage {
        url: format!("data:{};base64,{}", file.mime_type, STANDARD.encode(&file.bytes)),
    })
}

/// Reads and validates an image on disk in one step
pub async fn upload_from_path(path: impl AsRef<Path>) -> Result<UploadedImage, UploadError> {
    let file = ImageFile::from_path(path).await?;
    process_image_upload(&file)
}

pub fn mime_from_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
