//! Post editing.
//!
//! [`EditorState`] owns the draft and enforces the save, publish, delete,
//! tag and image rules. [`BodyBuffer`] is the rope-backed text area the body
//! is typed into; its text is copied into the draft after every edit.

mod buffer;
mod state;

pub use buffer::{BodyBuffer, Cursor, Direction};
pub use state::{EditorState, ImageSelection, MAX_IMAGE_BYTES, ValidationError, mime_for_path};
