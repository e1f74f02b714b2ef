//! Helpers shared by the `reelpost` binary.

use anyhow::Context;
use reelpost_core::models::{ThumbnailAsset, VideoAsset};
use reelpost_core::{AppError, Config, LogLevel};
use reelpost_db::{create_document_store, PublishRecordRepository};
use reelpost_storage::create_storage;
use reelpost_wizard::{StepTimings, SubmissionWorkflow, TracingNotifier, Transition};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Guess a MIME type from a file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

pub async fn load_thumbnail(path: &Path) -> anyhow::Result<ThumbnailAsset> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read thumbnail {}", path.display()))?;
    Ok(ThumbnailAsset::new(file_name(path), content_type_for(path), data))
}

pub async fn load_video(path: &Path) -> anyhow::Result<VideoAsset> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read video {}", path.display()))?;
    Ok(VideoAsset::new(file_name(path), content_type_for(path), data))
}

/// Records repository over the configured document backend.
pub async fn build_repository(config: &Config) -> Result<PublishRecordRepository, AppError> {
    let store = create_document_store(config).await?;
    Ok(PublishRecordRepository::new(store, config.posts_collection()))
}

/// Submission workflow over the configured storage and document backends.
pub async fn build_workflow(config: &Config) -> Result<SubmissionWorkflow, AppError> {
    let storage = create_storage(config).await?;
    let records = build_repository(config).await?;
    Ok(
        SubmissionWorkflow::new(storage, records, Arc::new(TracingNotifier::new()))
            .with_orphan_policy(config.orphan_policy()),
    )
}

/// Log a failed command at the level its error calls for.
pub fn report_failure(err: &AppError) {
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, code, "Command rejected"),
        LogLevel::Warn => tracing::warn!(error = %err, code, "Command failed"),
        LogLevel::Error => tracing::error!(
            error = %err,
            code,
            recoverable = err.is_recoverable(),
            "Command failed"
        ),
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TransitionView {
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: String,
}

impl From<Transition> for TransitionView {
    fn from(t: Transition) -> Self {
        Self {
            duration_ms: t.duration.as_secs_f64() * 1000.0,
            delay_ms: t.delay.as_secs_f64() * 1000.0,
            easing: format!("{:?}", t.easing),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TimingsView {
    pub speed_multiplier: f64,
    pub background: TransitionView,
    pub ripple: TransitionView,
    pub ripple_activate: TransitionView,
    pub check_icon: TransitionView,
}

impl TimingsView {
    pub fn new(speed_multiplier: f64, timings: StepTimings) -> Self {
        Self {
            speed_multiplier,
            background: timings.background.into(),
            ripple: timings.ripple.into(),
            ripple_activate: timings.ripple_activate.into(),
            check_icon: timings.check_icon.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelpost_wizard::AnimationConfig;

    #[test]
    fn content_type_from_extension() {
        assert_eq!(content_type_for(Path::new("a/thumb.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("clip.mov")), "video/quicktime");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn timings_view_reports_milliseconds() {
        let animation = AnimationConfig::new(2.0).unwrap();
        let view = TimingsView::new(animation.speed_multiplier(), animation.timings());
        assert!((view.ripple.duration_ms - 1200.0).abs() < 1e-6);
        assert_eq!(view.ripple.easing, "CircOut");
        assert_eq!(view.background.delay_ms, 0.0);
    }

    #[tokio::test]
    async fn backend_setup_errors_carry_app_error_codes() {
        let publisher = reelpost_core::PublisherConfig {
            document_backend: reelpost_core::DocumentBackend::Postgres,
            database_url: None,
            ..reelpost_core::PublisherConfig::default()
        };
        let err = build_repository(&Config(Box::new(publisher)))
            .await
            .err()
            .expect("missing DATABASE_URL must fail");
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[tokio::test]
    async fn build_workflow_over_local_backends() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = reelpost_core::PublisherConfig {
            local_storage_path: dir.path().join("objects").to_string_lossy().to_string(),
            document_store_path: dir.path().join("documents").to_string_lossy().to_string(),
            ..reelpost_core::PublisherConfig::default()
        };
        let workflow = build_workflow(&Config(Box::new(publisher))).await.unwrap();
        assert_eq!(workflow.records().collection(), "posts");
    }

    #[tokio::test]
    async fn load_thumbnail_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.jpg");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let thumb = load_thumbnail(&path).await.unwrap();
        assert_eq!(thumb.filename, "cover.jpg");
        assert_eq!(thumb.content_type, "image/jpeg");
        assert_eq!(thumb.size_bytes(), 3);

        assert!(load_thumbnail(&dir.path().join("missing.png")).await.is_err());
    }
}
