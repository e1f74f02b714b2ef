//! Local preview of the selected video.
//!
//! The selected file is written to a temporary file and exposed as a `file://` reference.
//! The file is removed when the preview is dropped, so replacing or clearing the selection
//! releases the previous one.

use reelpost_core::models::VideoAsset;
use std::io::{self, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
pub struct VideoPreview {
    file: NamedTempFile,
    url: String,
    content_type: String,
}

impl VideoPreview {
    pub fn create(video: &VideoAsset) -> io::Result<Self> {
        let suffix = Path::new(&video.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let mut file = Builder::new()
            .prefix("reelpost-preview-")
            .suffix(&suffix)
            .tempfile()?;
        file.write_all(&video.data)?;
        file.flush()?;

        let url = format!("file://{}", file.path().display());
        tracing::debug!(
            preview = %url,
            size_bytes = video.data.len(),
            "Created video preview"
        );

        Ok(Self {
            file,
            url,
            content_type: video.content_type.clone(),
        })
    }

    /// `file://` reference a host player can load.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> VideoAsset {
        VideoAsset::new("clip.mp4", "video/mp4", b"not really a video".to_vec())
    }

    #[test]
    fn test_preview_writes_file_with_extension() {
        let preview = VideoPreview::create(&clip()).unwrap();
        assert!(preview.url().starts_with("file://"));
        assert!(preview.url().ends_with(".mp4"));
        assert_eq!(std::fs::read(preview.path()).unwrap(), b"not really a video");
        assert_eq!(preview.content_type(), "video/mp4");
    }

    #[test]
    fn test_drop_releases_file() {
        let preview = VideoPreview::create(&clip()).unwrap();
        let path = preview.path().to_path_buf();
        assert!(path.exists());
        drop(preview);
        assert!(!path.exists());
    }
}
