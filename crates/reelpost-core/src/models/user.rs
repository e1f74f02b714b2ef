use serde::{Deserialize, Serialize};

/// Authenticated user as supplied by the identity provider.
///
/// Only the fields copied into a published record are modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub username: String,
    pub profile_picture_url: Option<String>,
}

impl AuthUser {
    pub fn new(uid: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            username: username.into(),
            profile_picture_url: None,
        }
    }

    pub fn with_profile_picture(mut self, url: impl Into<String>) -> Self {
        self.profile_picture_url = Some(url.into());
        self
    }
}
