//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`Request`]: Side effects queued by `update`, run by a [`Dispatcher`]
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::{ApiDispatcher, Dispatcher, Request};
pub use model::{
    Busy, Confirm, EditorFocus, EditorScreen, ListScreen, ListTab, Loadable, Model, RequestId,
    Route, Screen, ToastLevel, ViewScreen,
};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::Settings;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    settings: Settings,
    initial_route: Route,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application talking to the service in `settings`.
    pub const fn new(settings: Settings) -> Self {
        Self {
            settings,
            initial_route: Route::List,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Screen shown at startup.
    pub const fn with_initial_route(mut self, route: Route) -> Self {
        self.initial_route = route;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }
}
