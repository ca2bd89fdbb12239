use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::post::{Draft, Post, PostId};

/// Largest cover image accepted for upload (5 MB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Editor rule violations. All of them are caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title required: please add a title to save your blog post")]
    TitleRequired,
    #[error("Missing content: please add both a title and content to publish")]
    MissingContent,
    #[error("Save the post before deleting it")]
    NotPersisted,
    #[error("Tag is blank")]
    BlankTag,
    #[error("Tag '{0}' is already added")]
    DuplicateTag(String),
    #[error("Invalid file type: please select an image file")]
    NotAnImage,
    #[error("File too large: please select an image less than 5MB")]
    ImageTooLarge,
}

/// A file the user picked as the cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
    pub size: u64,
}

impl ImageSelection {
    /// Describe the file at `path` from its metadata and extension.
    ///
    /// The file contents are not read here.
    ///
    /// # Errors
    /// Returns an error if the file's metadata cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::other(format!(
                "{} is not a file",
                path.display()
            )));
        }
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime: mime_for_path(path).to_string(),
            size: metadata.len(),
        })
    }

    /// Check MIME prefix and size ceiling.
    ///
    /// # Errors
    /// [`ValidationError::NotAnImage`] or [`ValidationError::ImageTooLarge`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.mime.starts_with("image/") {
            return Err(ValidationError::NotAnImage);
        }
        if self.size > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge);
        }
        Ok(())
    }
}

/// MIME type guessed from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path).map_or("application/octet-stream", |format| {
        format.to_mime_type()
    })
}

/// The draft being edited and the rules for changing it.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    draft: Draft,
    last_saved_at: Option<DateTime<Local>>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_post(post: Post) -> Self {
        Self {
            draft: Draft::from(post),
            last_saved_at: None,
        }
    }

    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    pub const fn last_saved_at(&self) -> Option<DateTime<Local>> {
        self.last_saved_at
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.draft.body = body.into();
    }

    /// Append a tag after trimming it.
    ///
    /// # Errors
    /// Blank and duplicate tags are rejected and leave the list unchanged.
    pub fn add_tag(&mut self, raw: &str) -> Result<(), ValidationError> {
        let tag = raw.trim();
        if tag.is_empty() {
            return Err(ValidationError::BlankTag);
        }
        if self.draft.tags.iter().any(|t| t == tag) {
            return Err(ValidationError::DuplicateTag(tag.to_string()));
        }
        self.draft.tags.push(tag.to_string());
        Ok(())
    }

    /// Remove a tag by exact match. Returns whether anything was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.draft.tags.len();
        self.draft.tags.retain(|t| t != tag);
        self.draft.tags.len() != before
    }

    pub fn set_image(&mut self, url: impl Into<String>) {
        self.draft.image_url = Some(url.into());
    }

    pub fn clear_image(&mut self) {
        self.draft.image_url = None;
    }

    /// The draft to send for save-as-draft.
    ///
    /// # Errors
    /// [`ValidationError::TitleRequired`] when the title is empty.
    pub fn prepare_save_draft(&self) -> Result<Draft, ValidationError> {
        if self.draft.title.is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        Ok(self.draft.clone())
    }

    /// The draft to send for publishing.
    ///
    /// # Errors
    /// [`ValidationError::MissingContent`] unless both title and body are set.
    pub fn prepare_publish(&self) -> Result<Draft, ValidationError> {
        if self.draft.title.is_empty() || self.draft.body.is_empty() {
            return Err(ValidationError::MissingContent);
        }
        Ok(self.draft.clone())
    }

    /// The identifier to delete.
    ///
    /// # Errors
    /// [`ValidationError::NotPersisted`] for a draft the server never saw.
    pub fn prepare_delete(&self) -> Result<PostId, ValidationError> {
        self.draft.id.ok_or(ValidationError::NotPersisted)
    }

    /// Replace the local draft wholesale with the server's copy.
    pub fn apply_saved(&mut self, post: Post, at: DateTime<Local>) {
        self.draft = Draft::from(post);
        self.last_saved_at = Some(at);
    }

    /// Replace the local draft with a post loaded for editing.
    pub fn apply_loaded(&mut self, post: Post) {
        self.draft = Draft::from(post);
    }

    /// Record a background save. Only a missing identifier is taken from the
    /// response, so later saves update the same post.
    pub fn apply_auto_saved(&mut self, assigned: Option<PostId>, at: DateTime<Local>) {
        if self.draft.id.is_none() {
            self.draft.id = assigned;
        }
        self.last_saved_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostStatus;
    use proptest::prelude::*;

    fn server_post(id: i64, title: &str, body: &str) -> Post {
        Post {
            id: PostId::new(id),
            title: title.to_string(),
            body: body.to_string(),
            tags: vec!["server".into()],
            status: PostStatus::Draft,
            image_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_duplicate_and_blank_tags_are_rejected() {
        let mut state = EditorState::new();
        assert!(state.add_tag("x").is_ok());
        assert_eq!(state.add_tag("x"), Err(ValidationError::DuplicateTag("x".into())));
        assert_eq!(state.add_tag("  "), Err(ValidationError::BlankTag));
        assert_eq!(state.draft().tags, vec!["x".to_string()]);
    }

    #[test]
    fn test_tags_are_trimmed_and_ordered() {
        let mut state = EditorState::new();
        state.add_tag(" rust ").unwrap();
        state.add_tag("tui").unwrap();
        assert_eq!(state.add_tag("rust"), Err(ValidationError::DuplicateTag("rust".into())));
        assert_eq!(state.draft().tags, vec!["rust".to_string(), "tui".to_string()]);
    }

    #[test]
    fn test_remove_tag_is_exact_match() {
        let mut state = EditorState::new();
        state.add_tag("Rust").unwrap();
        assert!(!state.remove_tag("rust"));
        assert!(state.remove_tag("Rust"));
        assert!(state.draft().tags.is_empty());
    }

    #[test]
    fn test_save_requires_title() {
        let mut state = EditorState::new();
        state.set_body("body only");
        assert_eq!(state.prepare_save_draft(), Err(ValidationError::TitleRequired));
        state.set_title("T");
        assert_eq!(state.prepare_save_draft().unwrap().title, "T");
    }

    #[test]
    fn test_publish_requires_title_and_body() {
        let mut state = EditorState::new();
        state.set_title("T");
        assert_eq!(state.prepare_publish(), Err(ValidationError::MissingContent));
        state.set_body("B");
        let draft = state.prepare_publish().unwrap();
        assert_eq!((draft.title.as_str(), draft.body.as_str()), ("T", "B"));
    }

    #[test]
    fn test_delete_requires_identifier() {
        let state = EditorState::new();
        assert_eq!(state.prepare_delete(), Err(ValidationError::NotPersisted));
        let state = EditorState::from_post(server_post(3, "t", "b"));
        assert_eq!(state.prepare_delete(), Ok(PostId::new(3)));
    }

    #[test]
    fn test_apply_saved_replaces_not_merges() {
        let mut state = EditorState::new();
        state.set_title("local");
        state.add_tag("local-tag").unwrap();
        state.set_image("http://img/local.png");
        let now = Local::now();
        state.apply_saved(server_post(9, "server title", "server body"), now);
        assert_eq!(state.draft().id, Some(PostId::new(9)));
        assert_eq!(state.draft().title, "server title");
        assert_eq!(state.draft().tags, vec!["server".to_string()]);
        assert_eq!(state.draft().image_url, None);
        assert_eq!(state.last_saved_at(), Some(now));
    }

    #[test]
    fn test_auto_save_only_adopts_missing_identifier() {
        let mut state = EditorState::new();
        state.set_title("draft");
        state.apply_auto_saved(Some(PostId::new(4)), Local::now());
        assert_eq!(state.draft().id, Some(PostId::new(4)));
        assert_eq!(state.draft().title, "draft");
        state.apply_auto_saved(Some(PostId::new(99)), Local::now());
        assert_eq!(state.draft().id, Some(PostId::new(4)));
    }

    #[test]
    fn test_image_validation_limits() {
        let mut selection = ImageSelection {
            path: PathBuf::from("cover.png"),
            file_name: "cover.png".into(),
            mime: "image/png".into(),
            size: 4 * 1024 * 1024,
        };
        assert_eq!(selection.validate(), Ok(()));
        selection.size = 6 * 1024 * 1024;
        assert_eq!(selection.validate(), Err(ValidationError::ImageTooLarge));
        selection.size = MAX_IMAGE_BYTES;
        assert_eq!(selection.validate(), Ok(()));
        selection.mime = "application/pdf".into();
        assert_eq!(selection.validate(), Err(ValidationError::NotAnImage));
    }

    #[test]
    fn test_mime_for_path_uses_extension() {
        assert_eq!(mime_for_path(Path::new("a/b/photo.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("notes.txt")), "application/octet-stream");
    }

    #[test]
    fn test_image_selection_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.gif");
        std::fs::write(&path, vec![0u8; 1024]).unwrap();
        let selection = ImageSelection::from_path(&path).unwrap();
        assert_eq!(selection.file_name, "cover.gif");
        assert_eq!(selection.mime, "image/gif");
        assert_eq!(selection.size, 1024);
        assert!(ImageSelection::from_path(dir.path()).is_err());
    }

    proptest! {
        #[test]
        fn prop_tags_stay_unique_and_trimmed(inputs in proptest::collection::vec("[ a-c]{0,3}", 0..20)) {
            let mut state = EditorState::new();
            for input in &inputs {
                let _ = state.add_tag(input);
            }
            let tags = &state.draft().tags;
            let mut seen = std::collections::HashSet::new();
            for tag in tags {
                prop_assert!(!tag.is_empty());
                prop_assert_eq!(tag.trim(), tag.as_str());
                prop_assert!(seen.insert(tag.clone()));
            }
        }
    }
}
