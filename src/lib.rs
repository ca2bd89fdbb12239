// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. api::ApiClient)
    clippy::module_name_repetitions
)]

//! # BlogCraft
//!
//! A terminal client for a blog service.
//!
//! BlogCraft lets you:
//! - Browse published posts and drafts
//! - Read a post
//! - Write and edit posts with a title, body, tags and a cover image
//! - Save drafts, publish and delete
//!
//! While a post is open in the editor it is auto-saved as a draft, both a
//! few seconds after the last keystroke and on a fixed interval.
//!
//! ## Architecture
//!
//! BlogCraft uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions, queuing requests as data
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`api`]: REST client for the blog service
//! - [`autosave`]: Debounce and interval auto-save scheduling
//! - [`editor`]: Editable draft and body text buffer
//! - [`post`]: Post data model
//! - [`ui`]: Terminal UI components
//! - [`config`]: Flags files, environment and resolved settings

pub mod api;
pub mod app;
pub mod autosave;
pub mod config;
pub mod editor;
pub mod post;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, Route};
    pub use crate::post::{Draft, Post, PostId};
    pub use crate::ui::viewport::Viewport;
}
