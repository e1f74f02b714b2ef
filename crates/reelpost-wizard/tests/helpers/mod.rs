#![allow(dead_code)]

pub mod doubles;
pub mod fixtures;

use doubles::{CountingStorage, CountingStore};
use reelpost_core::models::{AuthUser, VideoUploadState};
use reelpost_core::OrphanPolicy;
use reelpost_db::PublishRecordRepository;
use reelpost_wizard::{RecordingNotifier, SubmissionWorkflow, WizardSession};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::watch;

pub const POSTS: &str = "posts";

/// Workflow wired to counting doubles over real local storage and an in-memory store.
pub struct TestHarness {
    pub storage: Arc<CountingStorage>,
    pub store: Arc<CountingStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub workflow: Arc<SubmissionWorkflow>,
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// A session for a signed-in user, with a sender for the video upload state.
    pub fn session(
        &self,
        video: VideoUploadState,
    ) -> (WizardSession, watch::Sender<VideoUploadState>) {
        let (tx, rx) = watch::channel(video);
        let session = WizardSession::new(Arc::clone(&self.workflow), Some(test_user()), rx);
        (session, tx)
    }
}

pub fn test_user() -> AuthUser {
    AuthUser::new("user-123", "ana").with_profile_picture("https://cdn.example.com/ana.png")
}

pub async fn setup_harness() -> TestHarness {
    setup_harness_with_policy(OrphanPolicy::default()).await
}

pub async fn setup_harness_with_policy(policy: OrphanPolicy) -> TestHarness {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = Arc::new(CountingStorage::new(temp_dir.path().join("objects")).await);
    let store = Arc::new(CountingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let records = PublishRecordRepository::new(store.clone(), POSTS);
    let workflow = SubmissionWorkflow::new(storage.clone(), records, notifier.clone())
        .with_orphan_policy(policy);

    TestHarness {
        storage,
        store,
        notifier,
        workflow: Arc::new(workflow),
        _temp_dir: temp_dir,
    }
}
