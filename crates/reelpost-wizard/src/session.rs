//! One user's pass through the publish wizard.
//!
//! Confirming a non-final step only advances the controller. Confirming the final step
//! runs the submission workflow; on success the controller moves to its completed state and
//! the completion signal fires, on failure the session stays on the final step so the user
//! can retry.

use reelpost_core::models::{AuthUser, PublishRecord, VideoAsset, VideoUploadState};
use std::io;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::animation::AnimationConfig;
use crate::error::SubmitError;
use crate::form::{FormUpdate, PublishForm};
use crate::preview::VideoPreview;
use crate::steps::{StepController, StepView};
use crate::submission::{PublishRequest, SubmissionWorkflow};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// Moved to the next step without any I/O.
    Advanced { to: StepView },
    /// The record was written and the wizard is complete.
    Published(PublishRecord),
}

pub struct WizardSession {
    post_id: Uuid,
    user: Option<AuthUser>,
    form: PublishForm,
    steps: StepController<StepView>,
    video_state: watch::Receiver<VideoUploadState>,
    preview: Option<VideoPreview>,
    workflow: Arc<SubmissionWorkflow>,
    animation: AnimationConfig,
    submitting: watch::Sender<bool>,
    completed: watch::Sender<bool>,
}

// Lowers the submitting flag on every exit path, including cancellation.
struct SubmittingFlag<'a>(&'a watch::Sender<bool>);

impl<'a> SubmittingFlag<'a> {
    fn raise(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for SubmittingFlag<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl WizardSession {
    /// Start a session with a fresh post id.
    ///
    /// `video_state` is published by whatever owns the primary video upload.
    pub fn new(
        workflow: Arc<SubmissionWorkflow>,
        user: Option<AuthUser>,
        video_state: watch::Receiver<VideoUploadState>,
    ) -> Self {
        Self {
            post_id: Uuid::new_v4(),
            user,
            form: PublishForm::default(),
            steps: StepController::publish_steps(),
            video_state,
            preview: None,
            workflow,
            animation: AnimationConfig::default(),
            submitting: watch::Sender::new(false),
            completed: watch::Sender::new(false),
        }
    }

    pub fn with_post_id(mut self, post_id: Uuid) -> Self {
        self.post_id = post_id;
        self
    }

    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn post_id(&self) -> Uuid {
        self.post_id
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<AuthUser>) {
        self.user = user;
    }

    pub fn form(&self) -> &PublishForm {
        &self.form
    }

    pub fn update_fields(&mut self, update: FormUpdate) {
        self.form.apply(update);
    }

    pub fn steps(&self) -> &StepController<StepView> {
        &self.steps
    }

    pub fn current_step(&self) -> Option<StepView> {
        self.steps.current().copied()
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    /// Replace the previewed video, releasing any previous preview file.
    pub fn set_video(&mut self, video: &VideoAsset) -> io::Result<&str> {
        let preview = self.preview.insert(VideoPreview::create(video)?);
        Ok(preview.url())
    }

    pub fn clear_video(&mut self) {
        self.preview = None;
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(VideoPreview::url)
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    /// Observe the submitting flag while a confirmation is running.
    pub fn submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// Flips to `true` once the record is written; hosts start the completion animation on it.
    pub fn completion(&self) -> watch::Receiver<bool> {
        self.completed.subscribe()
    }

    /// Go back one step. Returns whether the step changed.
    pub fn back(&mut self) -> bool {
        self.steps.retreat()
    }

    /// Confirm the current step.
    pub async fn confirm(&mut self) -> Result<ConfirmOutcome, SubmitError> {
        if self.steps.is_completed() {
            return Err(SubmitError::AlreadyCompleted);
        }

        if !self.steps.is_last() {
            self.steps.advance();
            let to = self.current_step().ok_or(SubmitError::AlreadyCompleted)?;
            tracing::debug!(post_id = %self.post_id, step = %to, "Advanced wizard step");
            return Ok(ConfirmOutcome::Advanced { to });
        }

        let video = self.video_state.borrow().clone();
        let submission = self.workflow.validate(PublishRequest {
            post_id: self.post_id,
            user: self.user.as_ref(),
            form: &self.form,
            video: &video,
        })?;

        let record = {
            let _flag = SubmittingFlag::raise(&self.submitting);
            self.workflow.execute(submission).await?
        };

        self.steps.jump_past_end();
        self.completed.send_replace(true);
        Ok(ConfirmOutcome::Published(record))
    }
}
