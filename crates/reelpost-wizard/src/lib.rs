//! Reelpost publish wizard
//!
//! A three-step "publish a video" flow (details, thumbnail, visibility). The
//! [`StepController`] sequences the steps; the [`SubmissionWorkflow`] runs on the final
//! confirmation, uploading the thumbnail and writing the published record; a
//! [`WizardSession`] ties both to one user's form state.

pub mod animation;
pub mod error;
pub mod form;
pub mod notify;
pub mod preview;
pub mod session;
pub mod single_flight;
pub mod steps;
pub mod submission;

pub use animation::{AnimationConfig, Easing, StepTimings, Transition};
pub use error::SubmitError;
pub use form::{FormUpdate, PublishForm};
pub use notify::{NotificationEvent, NotificationId, Notifier, RecordingNotifier, TracingNotifier};
pub use preview::VideoPreview;
pub use session::{ConfirmOutcome, WizardSession};
pub use single_flight::{InFlight, InFlightGuard};
pub use steps::{StepController, StepPosition, StepStatus, StepView};
pub use submission::{PublishRequest, SubmissionWorkflow, ValidatedSubmission};
