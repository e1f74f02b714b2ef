//! Form state accumulated across the wizard steps.

use reelpost_core::models::{ThumbnailAsset, Visibility};

/// Everything the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishForm {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<ThumbnailAsset>,
    pub visibility: Visibility,
}

impl PublishForm {
    /// Merge a partial update; fields absent from the update keep their value.
    pub fn apply(&mut self, update: FormUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(thumbnail) = update.thumbnail {
            self.thumbnail = thumbnail;
        }
        if let Some(visibility) = update.visibility {
            self.visibility = visibility;
        }
    }
}

/// A partial update to a [`PublishForm`], as emitted by one step view.
#[derive(Debug, Clone, Default)]
pub struct FormUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the selected thumbnail.
    pub thumbnail: Option<Option<ThumbnailAsset>>,
    pub visibility: Option<Visibility>,
}

impl FormUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn thumbnail(mut self, thumbnail: ThumbnailAsset) -> Self {
        self.thumbnail = Some(Some(thumbnail));
        self
    }

    pub fn clear_thumbnail(mut self) -> Self {
        self.thumbnail = Some(None);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_is_public_and_empty() {
        let form = PublishForm::default();
        assert_eq!(form.visibility, Visibility::Public);
        assert!(form.title.is_empty());
        assert!(form.thumbnail.is_none());
    }

    #[test]
    fn test_partial_updates_merge() {
        let mut form = PublishForm::default();
        form.apply(FormUpdate::new().title("Sunset").description("at the pier"));
        form.apply(FormUpdate::new().visibility(Visibility::Unlisted));

        assert_eq!(form.title, "Sunset");
        assert_eq!(form.description, "at the pier");
        assert_eq!(form.visibility, Visibility::Unlisted);
    }

    #[test]
    fn test_thumbnail_set_and_clear() {
        let mut form = PublishForm::default();
        form.apply(FormUpdate::new().thumbnail(ThumbnailAsset::new("t.png", "image/png", vec![1, 2, 3])));
        assert_eq!(form.thumbnail.as_ref().map(|t| t.size_bytes()), Some(3));

        form.apply(FormUpdate::new().title("kept"));
        assert!(form.thumbnail.is_some());

        form.apply(FormUpdate::new().clear_thumbnail());
        assert!(form.thumbnail.is_none());
        assert_eq!(form.title, "kept");
    }
}
