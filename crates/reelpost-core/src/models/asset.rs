use std::fmt;

use serde::{Deserialize, Serialize};

/// An image the user picked as the video's thumbnail, held in memory until upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ThumbnailAsset {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ThumbnailAsset {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

// Skip the payload so logging a form never dumps image bytes.
impl fmt::Debug for ThumbnailAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbnailAsset")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}

/// The locally selected video file, used for the in-wizard preview only.
#[derive(Clone, PartialEq, Eq)]
pub struct VideoAsset {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl VideoAsset {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

impl fmt::Debug for VideoAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoAsset")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}

/// Progress of the primary video upload, published by the uploader that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUploadState {
    /// Durable URL of the uploaded video, once the upload has finished
    pub download_url: Option<String>,
    /// Whether the upload is still running
    pub uploading: bool,
}

impl VideoUploadState {
    pub fn in_progress() -> Self {
        Self {
            download_url: None,
            uploading: true,
        }
    }

    pub fn ready(download_url: impl Into<String>) -> Self {
        Self {
            download_url: Some(download_url.into()),
            uploading: false,
        }
    }

    /// The resolved URL, treating an empty string as unresolved.
    pub fn resolved_url(&self) -> Option<&str> {
        self.download_url.as_deref().filter(|url| !url.is_empty())
    }
}
