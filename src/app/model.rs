use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::autosave::{AutoSave, AutoSaveConfig};
use crate::config::ThemeMode;
use crate::editor::{BodyBuffer, EditorState};
use crate::post::{Draft, Post, PostId, partition_by_status};
use crate::ui::viewport::Viewport;

use super::effects::Request;

const TOAST_TTL: Duration = Duration::from_secs(4);

/// Identity of one outstanding fetch, used to drop responses for screens
/// that are no longer mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestId(u64);

impl RequestId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Where the user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    View(PostId),
    Editor(Option<PostId>),
}

impl Route {
    pub fn label(self) -> String {
        match self {
            Self::List => "Posts".to_string(),
            Self::View(id) => format!("Post #{id}"),
            Self::Editor(None) => "New post".to_string(),
            Self::Editor(Some(id)) => format!("Edit #{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// A fetch result as seen by a screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Ready(T),
    Failed,
}

impl<T> Loadable<T> {
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListTab {
    #[default]
    Published,
    Drafts,
}

impl ListTab {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Published => Self::Drafts,
            Self::Drafts => Self::Published,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListScreen {
    pub posts: Loadable<Vec<Post>>,
    pub tab: ListTab,
    pub selected: usize,
    pub request: RequestId,
}

impl ListScreen {
    /// Posts in the active tab, in server order.
    pub fn visible_posts(&self) -> Vec<&Post> {
        let Some(posts) = self.posts.ready() else {
            return Vec::new();
        };
        let (published, drafts) = partition_by_status(posts);
        match self.tab {
            ListTab::Published => published,
            ListTab::Drafts => drafts,
        }
    }

    /// `(published, drafts)` counts for the tab titles.
    pub fn counts(&self) -> (usize, usize) {
        self.posts.ready().map_or((0, 0), |posts| {
            let (published, drafts) = partition_by_status(posts);
            (published.len(), drafts.len())
        })
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.visible_posts().get(self.selected).copied()
    }

    pub(super) fn clamp_selection(&mut self) {
        let len = self.visible_posts().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Clone)]
pub struct ViewScreen {
    pub id: PostId,
    pub post: Loadable<Post>,
    pub viewport: Viewport,
    pub request: RequestId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorFocus {
    #[default]
    Title,
    Body,
    Tags,
}

impl EditorFocus {
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Body,
            Self::Body => Self::Tags,
            Self::Tags => Self::Title,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Tags,
            Self::Body => Self::Title,
            Self::Tags => Self::Body,
        }
    }
}

/// In-flight editor actions. Each one blocks its own re-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Busy {
    pub saving: bool,
    pub publishing: bool,
    pub uploading: bool,
    pub deleting: bool,
}

impl Busy {
    /// Delete waits for saves and publishes to settle.
    pub const fn blocks_delete(self) -> bool {
        self.saving || self.publishing || self.deleting
    }
}

#[derive(Debug)]
pub struct EditorScreen {
    /// Identity of this editing session; completions from older sessions
    /// are dropped.
    pub session: RequestId,
    pub state: EditorState,
    pub body: BodyBuffer,
    pub focus: EditorFocus,
    pub tag_input: String,
    pub selected_tag: Option<usize>,
    /// Path being typed for the cover image, while the prompt is open.
    pub image_prompt: Option<String>,
    pub autosave: AutoSave<Draft>,
    /// Set while the post is being fetched for editing.
    pub loading: Option<RequestId>,
    pub busy: Busy,
    pub body_scroll: usize,
    /// Set after the first Esc with unsaved changes; a second Esc discards.
    pub exit_confirmed: bool,
}

impl EditorScreen {
    pub(super) fn new(session: RequestId, config: AutoSaveConfig, now_ms: u64) -> Self {
        let state = EditorState::new();
        let autosave = AutoSave::new(state.draft().clone(), config, now_ms);
        Self {
            session,
            state,
            body: BodyBuffer::empty(),
            focus: EditorFocus::Title,
            tag_input: String::new(),
            selected_tag: None,
            image_prompt: None,
            autosave,
            loading: None,
            busy: Busy::default(),
            body_scroll: 0,
            exit_confirmed: false,
        }
    }

    /// Whether the draft differs from what the service last accepted.
    pub fn has_unsaved_changes(&self) -> bool {
        self.autosave.has_unsaved(self.state.draft())
    }

    /// Take a post from the service as the new baseline.
    pub(super) fn load_post(&mut self, post: Post) {
        self.body.replace_text(&post.body);
        self.state.apply_loaded(post);
        self.autosave.mark_saved(self.state.draft().clone());
        self.selected_tag = None;
    }
}

#[derive(Debug)]
pub enum Screen {
    List(ListScreen),
    View(ViewScreen),
    Editor(Box<EditorScreen>),
}

impl Default for Screen {
    fn default() -> Self {
        Self::List(ListScreen::default())
    }
}

/// A question waiting for y/n.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    DeletePost(PostId),
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Default)]
pub struct Model {
    pub screen: Screen,
    pub theme: ThemeMode,
    pub help_visible: bool,
    pub confirm: Option<Confirm>,
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved editor changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Terminal size `(width, height)`.
    pub size: (u16, u16),
    /// Monotonic milliseconds since the event loop started.
    pub clock_ms: u64,
    pub autosave_config: AutoSaveConfig,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    pub api_url: String,
    toast: Option<Toast>,
    next_request: u64,
    outbox: Vec<Request>,
}

impl Model {
    pub fn new(terminal_size: (u16, u16), theme: ThemeMode, autosave: AutoSaveConfig) -> Self {
        Self {
            size: terminal_size,
            theme,
            autosave_config: autosave,
            ..Self::default()
        }
    }

    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::List(_) => Route::List,
            Screen::View(view) => Route::View(view.id),
            Screen::Editor(editor) => Route::Editor(editor.state.draft().id),
        }
    }

    pub fn editor(&self) -> Option<&EditorScreen> {
        match &self.screen {
            Screen::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    pub(super) fn editor_mut(&mut self) -> Option<&mut EditorScreen> {
        match &mut self.screen {
            Screen::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    /// Whether the editor is open with changes the service has not seen.
    pub fn editor_is_dirty(&self) -> bool {
        self.editor().is_some_and(EditorScreen::has_unsaved_changes)
    }

    /// Rows available to the main content, between the header and footer.
    pub fn content_height(&self) -> u16 {
        let toast_rows = u16::from(self.toast.is_some());
        self.size.1.saturating_sub(2 + toast_rows)
    }

    pub(super) fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    pub(super) fn push_request(&mut self, request: Request) {
        tracing::debug!(?request, "queued request");
        self.outbox.push(request);
    }

    /// Requests queued by `update` that have not been dispatched yet.
    pub fn pending_requests(&self) -> &[Request] {
        &self.outbox
    }

    /// Hand the queued requests to the caller.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
