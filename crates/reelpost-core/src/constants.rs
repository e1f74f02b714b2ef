//! Shared constants.

/// Collection that published video records are written to.
pub const POSTS_COLLECTION: &str = "posts";

/// Field of a published record that the document store stamps on write.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Upper bound for the animation speed multiplier; larger values overflow transition durations.
pub const MAX_ANIMATION_SPEED_MULTIPLIER: f64 = 1000.0;

/// User-facing notification texts.
pub mod messages {
    pub const PUBLISHING: &str = "publishing";
    pub const PUBLISHED: &str = "published";
    pub const GENERIC_FAILURE: &str = "whoops! something went wrong";
    pub const CHOOSE_THUMBNAIL: &str = "please choose a thumbnail";
    pub const VIDEO_UPLOADING: &str = "wait, video still uploading";
    pub const NOT_AUTHENTICATED: &str = "please sign in to publish";
    pub const ALREADY_PUBLISHING: &str = "already publishing, please wait";
    pub const ALREADY_PUBLISHED: &str = "this video is already published";
}
