use reelpost_core::constants::messages;
use reelpost_core::AppError;
use reelpost_db::DocumentStoreError;
use reelpost_storage::StorageError;
use thiserror::Error;
use uuid::Uuid;

/// Why a publish attempt did not produce a record.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no authenticated user")]
    NotAuthenticated,

    #[error("no thumbnail selected")]
    MissingThumbnail,

    #[error("video upload still in progress")]
    VideoStillUploading,

    #[error("video upload finished without a download URL")]
    VideoNotReady,

    #[error("a submission for post {0} is already in flight")]
    AlreadySubmitting(Uuid),

    #[error("wizard already completed")]
    AlreadyCompleted,

    #[error("thumbnail upload failed: {0}")]
    Upload(#[source] StorageError),

    #[error("thumbnail URL resolution failed: {0}")]
    ResolveUrl(#[source] StorageError),

    #[error("record write failed: {0}")]
    Persist(#[source] DocumentStoreError),
}

impl SubmitError {
    /// Rejected before any I/O was attempted.
    pub fn is_precondition(&self) -> bool {
        !matches!(
            self,
            SubmitError::Upload(_) | SubmitError::ResolveUrl(_) | SubmitError::Persist(_)
        )
    }

    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::NotAuthenticated => messages::NOT_AUTHENTICATED,
            SubmitError::MissingThumbnail => messages::CHOOSE_THUMBNAIL,
            SubmitError::VideoStillUploading | SubmitError::VideoNotReady => {
                messages::VIDEO_UPLOADING
            }
            SubmitError::AlreadySubmitting(_) => messages::ALREADY_PUBLISHING,
            SubmitError::AlreadyCompleted => messages::ALREADY_PUBLISHED,
            SubmitError::Upload(_) | SubmitError::ResolveUrl(_) | SubmitError::Persist(_) => {
                messages::GENERIC_FAILURE
            }
        }
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::NotAuthenticated => {
                AppError::Unauthorized(messages::NOT_AUTHENTICATED.to_string())
            }
            SubmitError::Upload(e) | SubmitError::ResolveUrl(e) => e.into(),
            SubmitError::Persist(e) => e.into(),
            other => AppError::InvalidInput(other.user_message().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            SubmitError::MissingThumbnail.user_message(),
            "please choose a thumbnail"
        );
        assert_eq!(
            SubmitError::VideoStillUploading.user_message(),
            "wait, video still uploading"
        );
        assert_eq!(
            SubmitError::VideoNotReady.user_message(),
            SubmitError::VideoStillUploading.user_message()
        );
        assert_eq!(
            SubmitError::Upload(StorageError::UploadFailed("boom".into())).user_message(),
            "whoops! something went wrong"
        );
    }

    #[test]
    fn test_already_completed_has_its_own_message() {
        assert_eq!(
            SubmitError::AlreadyCompleted.user_message(),
            "this video is already published"
        );
    }

    #[test]
    fn test_conversion_to_app_error() {
        let unauthorized: AppError = SubmitError::NotAuthenticated.into();
        assert_eq!(unauthorized.error_code(), "UNAUTHORIZED");

        let rejected: AppError = SubmitError::MissingThumbnail.into();
        assert_eq!(rejected.error_code(), "INVALID_INPUT");
        assert_eq!(rejected.to_string(), "Invalid input: please choose a thumbnail");

        let upload: AppError = SubmitError::Upload(StorageError::UploadFailed("boom".into())).into();
        assert_eq!(upload.error_code(), "STORAGE_ERROR");
        assert!(upload.is_recoverable());

        let persist: AppError =
            SubmitError::Persist(DocumentStoreError::Backend("down".into())).into();
        assert_eq!(persist.error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_precondition_classification() {
        assert!(SubmitError::NotAuthenticated.is_precondition());
        assert!(SubmitError::AlreadySubmitting(Uuid::nil()).is_precondition());
        assert!(!SubmitError::Persist(DocumentStoreError::Backend("down".into())).is_precondition());
    }
}
