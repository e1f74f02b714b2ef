//! User-facing notifications.
//!
//! The wizard reports progress through a [`Notifier`]: a loading notice while publishing
//! that is later resolved to success or error, and standalone error notices for
//! rejected submissions. Calls are fire-and-forget.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Handle to a loading notification, used to resolve it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

pub trait Notifier: Send + Sync {
    /// Show a loading notice and return its handle.
    fn show_loading(&self, message: &str) -> NotificationId;

    /// Replace a loading notice with a success message.
    fn resolve_success(&self, id: NotificationId, message: &str);

    /// Replace a loading notice with an error message.
    fn resolve_error(&self, id: NotificationId, message: &str);

    /// Show a standalone error notice.
    fn error(&self, message: &str);
}

/// Notifier that writes every notice to the tracing log.
#[derive(Debug, Default)]
pub struct TracingNotifier {
    next_id: AtomicU64,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for TracingNotifier {
    fn show_loading(&self, message: &str) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        tracing::info!(notification_id = id.0, notice = message, "Loading");
        id
    }

    fn resolve_success(&self, id: NotificationId, message: &str) {
        tracing::info!(notification_id = id.0, notice = message, "Success");
    }

    fn resolve_error(&self, id: NotificationId, message: &str) {
        tracing::warn!(notification_id = id.0, notice = message, "Failed");
    }

    fn error(&self, message: &str) {
        tracing::warn!(notice = message, "Rejected");
    }
}

/// One notice as seen by a [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Loading { id: NotificationId, message: String },
    Success { id: NotificationId, message: String },
    ResolvedError { id: NotificationId, message: String },
    Error { message: String },
}

impl NotificationEvent {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            NotificationEvent::ResolvedError { .. } | NotificationEvent::Error { .. }
        )
    }

    pub fn message(&self) -> &str {
        match self {
            NotificationEvent::Loading { message, .. }
            | NotificationEvent::Success { message, .. }
            | NotificationEvent::ResolvedError { message, .. }
            | NotificationEvent::Error { message } => message,
        }
    }
}

/// Notifier that keeps every notice in memory, for hosts that render them later and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    next_id: AtomicU64,
    events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn error_count(&self) -> usize {
        self.events().iter().filter(|e| e.is_error()).count()
    }

    pub fn success_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, NotificationEvent::Success { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, event: NotificationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Notifier for RecordingNotifier {
    fn show_loading(&self, message: &str) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.push(NotificationEvent::Loading {
            id,
            message: message.to_string(),
        });
        id
    }

    fn resolve_success(&self, id: NotificationId, message: &str) {
        self.push(NotificationEvent::Success {
            id,
            message: message.to_string(),
        });
    }

    fn resolve_error(&self, id: NotificationId, message: &str) {
        self.push(NotificationEvent::ResolvedError {
            id,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.push(NotificationEvent::Error {
            message: message.to_string(),
        });
    }
}
