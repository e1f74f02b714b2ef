use reelpost_core::models::{ThumbnailAsset, Visibility};
use reelpost_wizard::{FormUpdate, WizardSession};

/// A 1x1 transparent PNG.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn test_thumbnail() -> ThumbnailAsset {
    ThumbnailAsset::new("thumb.png", "image/png", TINY_PNG.to_vec())
}

/// Fill every field and confirm the first two steps, leaving the session on the last step.
pub async fn fill_to_last_step(session: &mut WizardSession) {
    session.update_fields(
        FormUpdate::new()
            .title("Sunset timelapse")
            .description("Shot from the pier"),
    );
    session.confirm().await.expect("details step");
    session.update_fields(FormUpdate::new().thumbnail(test_thumbnail()));
    session.confirm().await.expect("thumbnail step");
    session.update_fields(FormUpdate::new().visibility(Visibility::Public));
    assert!(session.steps().is_last());
}
