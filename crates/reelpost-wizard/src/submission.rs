//! Publish workflow run on the final confirmation.
//!
//! Validation is pure and happens first; only a validated submission touches storage.
//! Execution uploads the thumbnail to `posts/{post_id}/thumbnail`, resolves its
//! download URL, then writes the record under the same post id.

use reelpost_core::constants::messages;
use reelpost_core::models::{
    AuthUser, NewPublishRecord, PublishRecord, ThumbnailAsset, Visibility, VideoUploadState,
};
use reelpost_core::OrphanPolicy;
use reelpost_db::PublishRecordRepository;
use reelpost_storage::{thumbnail_key, Storage};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::error::SubmitError;
use crate::form::PublishForm;
use crate::notify::Notifier;
use crate::single_flight::{InFlight, InFlightGuard};

/// Inputs for one publish attempt.
#[derive(Debug, Clone, Copy)]
pub struct PublishRequest<'a> {
    pub post_id: Uuid,
    pub user: Option<&'a AuthUser>,
    pub form: &'a PublishForm,
    pub video: &'a VideoUploadState,
}

/// A request that passed every precondition and holds the in-flight claim for its post id.
#[derive(Debug)]
pub struct ValidatedSubmission {
    post_id: Uuid,
    author: AuthUser,
    thumbnail: ThumbnailAsset,
    video_url: String,
    title: String,
    description: String,
    visibility: Visibility,
    _claim: InFlightGuard,
}

impl ValidatedSubmission {
    pub fn post_id(&self) -> Uuid {
        self.post_id
    }
}

pub struct SubmissionWorkflow {
    storage: Arc<dyn Storage>,
    records: PublishRecordRepository,
    notifier: Arc<dyn Notifier>,
    orphan_policy: OrphanPolicy,
    inflight: InFlight,
}

impl SubmissionWorkflow {
    pub fn new(
        storage: Arc<dyn Storage>,
        records: PublishRecordRepository,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            storage,
            records,
            notifier,
            orphan_policy: OrphanPolicy::default(),
            inflight: InFlight::new(),
        }
    }

    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    pub fn orphan_policy(&self) -> OrphanPolicy {
        self.orphan_policy
    }

    pub fn records(&self) -> &PublishRecordRepository {
        &self.records
    }

    /// Whether a submission for `post_id` is currently running.
    pub fn is_in_flight(&self, post_id: Uuid) -> bool {
        self.inflight.is_active(post_id)
    }

    /// Validate and execute in one call.
    pub async fn publish(&self, request: PublishRequest<'_>) -> Result<PublishRecord, SubmitError> {
        let submission = self.validate(request)?;
        self.execute(submission).await
    }

    /// Check preconditions without any I/O.
    ///
    /// A rejection is reported to the notifier as a standalone error.
    pub fn validate(&self, request: PublishRequest<'_>) -> Result<ValidatedSubmission, SubmitError> {
        self.check(request).map_err(|err| {
            tracing::debug!(post_id = %request.post_id, reason = %err, "Publish rejected");
            self.notifier.error(err.user_message());
            err
        })
    }

    fn check(&self, request: PublishRequest<'_>) -> Result<ValidatedSubmission, SubmitError> {
        let author = request.user.ok_or(SubmitError::NotAuthenticated)?;
        let thumbnail = request
            .form
            .thumbnail
            .as_ref()
            .ok_or(SubmitError::MissingThumbnail)?;
        let video_url = match request.video.resolved_url() {
            Some(url) => url,
            None if request.video.uploading => return Err(SubmitError::VideoStillUploading),
            None => return Err(SubmitError::VideoNotReady),
        };
        let claim = self
            .inflight
            .try_acquire(request.post_id)
            .ok_or(SubmitError::AlreadySubmitting(request.post_id))?;

        Ok(ValidatedSubmission {
            post_id: request.post_id,
            author: author.clone(),
            thumbnail: thumbnail.clone(),
            video_url: video_url.to_string(),
            title: request.form.title.clone(),
            description: request.form.description.clone(),
            visibility: request.form.visibility,
            _claim: claim,
        })
    }

    /// Upload, resolve and write, reporting progress through the notifier.
    #[tracing::instrument(skip(self, submission), fields(post_id = %submission.post_id))]
    pub async fn execute(&self, submission: ValidatedSubmission) -> Result<PublishRecord, SubmitError> {
        let start = Instant::now();
        let notice = self.notifier.show_loading(messages::PUBLISHING);

        match self.upload_and_write(&submission).await {
            Ok(record) => {
                tracing::info!(
                    post_id = %record.post_id,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Video published"
                );
                self.notifier.resolve_success(notice, messages::PUBLISHED);
                Ok(record)
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Publish failed"
                );
                self.notifier.resolve_error(notice, err.user_message());
                Err(err)
            }
        }
    }

    async fn upload_and_write(
        &self,
        submission: &ValidatedSubmission,
    ) -> Result<PublishRecord, SubmitError> {
        let key = thumbnail_key(submission.post_id);
        let thumbnail = &submission.thumbnail;

        let uploaded = self
            .storage
            .upload_with_key(&key, thumbnail.data.clone(), &thumbnail.content_type)
            .await
            .map_err(SubmitError::Upload)?;

        let thumbnail_url = self
            .storage
            .resolve_download_url(&uploaded)
            .await
            .map_err(SubmitError::ResolveUrl)?;

        let record = NewPublishRecord::new(
            submission.post_id,
            submission.video_url.as_str(),
            thumbnail_url,
            submission.title.as_str(),
            submission.description.as_str(),
            &submission.author,
            submission.visibility,
        );

        match self.records.put(&record).await {
            Ok(stored) => Ok(stored),
            Err(err) => {
                self.discard_orphan(&key).await;
                Err(SubmitError::Persist(err))
            }
        }
    }

    async fn discard_orphan(&self, key: &str) {
        match self.orphan_policy {
            OrphanPolicy::Keep => {
                tracing::warn!(key = %key, "Record write failed, keeping uploaded thumbnail");
            }
            OrphanPolicy::DeleteUploaded => {
                if let Err(e) = self.storage.delete(key).await {
                    tracing::warn!(key = %key, error = %e, "Failed to delete orphaned thumbnail");
                } else {
                    tracing::debug!(key = %key, "Deleted orphaned thumbnail");
                }
            }
        }
    }
}
