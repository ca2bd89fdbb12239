//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position for the post view
//! - [`style`]: Theme palettes
//! - the list, post and editor screens, status bars and overlays

pub mod style;
pub mod viewport;

mod editor;
mod overlays;
mod render;
mod status;
mod wrap;

pub use editor::{editor_body_rows, line_number_width};
pub use render::{content_width, post_view_height, post_view_lines, render};
pub use wrap::{truncate_to_width, wrap_words};

pub const CONTENT_LEFT_PADDING: u16 = 2;
