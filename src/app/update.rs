use std::path::PathBuf;

use chrono::Local;

use crate::api::ApiError;
use crate::app::Model;
use crate::autosave::SaveTicket;
use crate::editor::{Direction, ImageSelection, ValidationError};
use crate::post::{Draft, Post, PostId};
use crate::ui::viewport::Viewport;

use super::effects::Request;
use super::model::{
    Confirm, EditorScreen, ListScreen, Loadable, RequestId, Route, Screen, ToastLevel, ViewScreen,
};

/// All possible events and actions in the application.
///
/// These represent user input, results coming back from the blog service,
/// and the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Shell
    /// Switch screens; the new screen fetches what it needs
    Navigate(Route),
    ToggleTheme,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // List
    ListUp,
    ListDown,
    /// Switch between the published and drafts tabs
    ListNextTab,
    /// Open the selected post's view
    OpenSelected,
    /// Open the selected post in the editor
    EditSelected,
    /// Fetch the current screen's data again
    Refresh,

    // View
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Editor fields
    FocusNext,
    FocusPrev,
    TitleInput(char),
    TitleBackspace,
    /// Insert a character at the body cursor
    EditorInsertChar(char),
    /// Insert pasted text at the body cursor
    EditorPaste(String),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    EditorMoveCursor(Direction),
    EditorMoveHome,
    EditorMoveEnd,
    EditorMoveWordLeft,
    EditorMoveWordRight,
    EditorMoveToStart,
    EditorMoveToEnd,
    EditorScrollUp(usize),
    EditorScrollDown(usize),
    TagInput(char),
    TagBackspace,
    /// Add the typed tag and clear the tag input
    CommitTag,
    SelectTag(Option<usize>),
    RemoveTag(String),

    // Cover image
    StartImagePrompt,
    ImagePromptInput(char),
    ImagePromptBackspace,
    SubmitImagePath,
    CancelImagePrompt,
    RemoveImage,

    // Editor actions
    SaveDraft,
    Publish,
    /// Ask for confirmation before deleting the current post
    RequestDelete,
    ConfirmDelete,
    CancelConfirm,
    /// Leave the editor (warns once about unsaved changes)
    LeaveEditor,

    // Results
    PostsLoaded {
        request: RequestId,
        result: Result<Vec<Post>, ApiError>,
    },
    PostLoaded {
        request: RequestId,
        result: Result<Post, ApiError>,
    },
    EditorPostLoaded {
        request: RequestId,
        result: Result<Post, ApiError>,
    },
    ImageInspected {
        session: RequestId,
        result: Result<ImageSelection, ApiError>,
    },
    ImageUploaded {
        session: RequestId,
        result: Result<String, ApiError>,
    },
    DraftSaved {
        session: RequestId,
        result: Result<Post, ApiError>,
    },
    Published {
        session: RequestId,
        result: Result<Post, ApiError>,
    },
    Deleted {
        id: PostId,
        result: Result<(), ApiError>,
    },
    AutoSaveFinished {
        session: RequestId,
        ticket: SaveTicket<Draft>,
        result: Result<Post, ApiError>,
    },

    // Clock and window
    /// Monotonic milliseconds since the loop started
    Tick(u64),
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

impl Message {
    /// Messages that do not come from the user.
    const fn is_background(&self) -> bool {
        matches!(
            self,
            Self::Tick(_)
                | Self::Resize(..)
                | Self::PostsLoaded { .. }
                | Self::PostLoaded { .. }
                | Self::EditorPostLoaded { .. }
                | Self::ImageInspected { .. }
                | Self::ImageUploaded { .. }
                | Self::DraftSaved { .. }
                | Self::Published { .. }
                | Self::Deleted { .. }
                | Self::AutoSaveFinished { .. }
        )
    }
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Network and
/// filesystem work is queued as [`Request`]s on the model instead of being
/// performed here.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any user action other than the confirmed one.
    if !msg.is_background() {
        if !matches!(msg, Message::Quit | Message::SaveDraft) {
            model.quit_confirmed = false;
        }
        if !matches!(msg, Message::LeaveEditor | Message::SaveDraft)
            && let Some(editor) = model.editor_mut()
        {
            editor.exit_confirmed = false;
        }
    }

    match msg {
        // Shell
        Message::Navigate(route) => navigate(&mut model, route),
        Message::ToggleTheme => {
            model.theme = model.theme.toggled();
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // List
        Message::ListUp => {
            if let Screen::List(list) = &mut model.screen {
                list.selected = list.selected.saturating_sub(1);
            }
        }
        Message::ListDown => {
            if let Screen::List(list) = &mut model.screen {
                list.selected += 1;
                list.clamp_selection();
            }
        }
        Message::ListNextTab => {
            if let Screen::List(list) = &mut model.screen {
                list.tab = list.tab.toggled();
                list.selected = 0;
            }
        }
        Message::OpenSelected => {
            if let Some(id) = selected_post_id(&model) {
                navigate(&mut model, Route::View(id));
            }
        }
        Message::EditSelected => {
            if let Some(id) = selected_post_id(&model) {
                navigate(&mut model, Route::Editor(Some(id)));
            }
        }
        Message::Refresh => match &model.screen {
            Screen::List(list) => {
                let tab = list.tab;
                navigate(&mut model, Route::List);
                if let Screen::List(list) = &mut model.screen {
                    list.tab = tab;
                }
            }
            Screen::View(view) => {
                let id = view.id;
                navigate(&mut model, Route::View(id));
            }
            Screen::Editor(_) => {}
        },

        // View
        Message::ScrollUp(n) => with_view(&mut model, |vp| vp.scroll_up(n)),
        Message::ScrollDown(n) => with_view(&mut model, |vp| vp.scroll_down(n)),
        Message::PageUp => with_view(&mut model, Viewport::page_up),
        Message::PageDown => with_view(&mut model, Viewport::page_down),
        Message::GoToTop => with_view(&mut model, Viewport::go_to_top),
        Message::GoToBottom => with_view(&mut model, Viewport::go_to_bottom),

        // Editor fields
        Message::FocusNext => {
            if let Some(editor) = model.editor_mut() {
                editor.focus = editor.focus.next();
            }
        }
        Message::FocusPrev => {
            if let Some(editor) = model.editor_mut() {
                editor.focus = editor.focus.prev();
            }
        }
        Message::TitleInput(ch) => edit(&mut model, |editor| {
            let mut title = editor.state.draft().title.clone();
            title.push(ch);
            editor.state.set_title(title);
            true
        }),
        Message::TitleBackspace => edit(&mut model, |editor| {
            let mut title = editor.state.draft().title.clone();
            let removed = title.pop().is_some();
            editor.state.set_title(title);
            removed
        }),
        Message::EditorInsertChar(ch) => edit_body(&mut model, |editor| {
            editor.body.insert_char(ch);
            true
        }),
        Message::EditorPaste(text) => edit_body(&mut model, |editor| {
            editor.body.insert_str(&text);
            !text.is_empty()
        }),
        Message::EditorDeleteBack => edit_body(&mut model, |editor| editor.body.delete_back()),
        Message::EditorDeleteForward => {
            edit_body(&mut model, |editor| editor.body.delete_forward());
        }
        Message::EditorSplitLine => edit_body(&mut model, |editor| {
            editor.body.split_line();
            true
        }),
        Message::EditorMoveCursor(dir) => move_body(&mut model, |editor| {
            editor.body.move_cursor(dir);
        }),
        Message::EditorMoveHome => move_body(&mut model, |editor| editor.body.move_home()),
        Message::EditorMoveEnd => move_body(&mut model, |editor| editor.body.move_end()),
        Message::EditorMoveWordLeft => {
            move_body(&mut model, |editor| editor.body.move_word_left());
        }
        Message::EditorMoveWordRight => {
            move_body(&mut model, |editor| editor.body.move_word_right());
        }
        Message::EditorMoveToStart => {
            move_body(&mut model, |editor| editor.body.move_to_start());
        }
        Message::EditorMoveToEnd => move_body(&mut model, |editor| editor.body.move_to_end()),
        Message::EditorScrollUp(n) => {
            if let Some(editor) = model.editor_mut() {
                editor.body_scroll = editor.body_scroll.saturating_sub(n);
            }
        }
        Message::EditorScrollDown(n) => {
            if let Some(editor) = model.editor_mut() {
                let max = editor.body.line_count().saturating_sub(1);
                editor.body_scroll = (editor.body_scroll + n).min(max);
            }
        }
        Message::TagInput(ch) => {
            if let Some(editor) = model.editor_mut() {
                editor.tag_input.push(ch);
            }
        }
        Message::TagBackspace => {
            if let Some(editor) = model.editor_mut() {
                editor.tag_input.pop();
            }
        }
        Message::CommitTag => edit(&mut model, |editor| {
            let raw = std::mem::take(&mut editor.tag_input);
            match editor.state.add_tag(&raw) {
                Ok(()) => true,
                Err(err) => {
                    tracing::debug!(%err, "tag not added");
                    false
                }
            }
        }),
        Message::SelectTag(index) => {
            if let Some(editor) = model.editor_mut() {
                let count = editor.state.draft().tags.len();
                editor.selected_tag = index.filter(|&i| i < count);
            }
        }
        Message::RemoveTag(tag) => edit(&mut model, |editor| {
            let removed = editor.state.remove_tag(&tag);
            let count = editor.state.draft().tags.len();
            editor.selected_tag = editor
                .selected_tag
                .and_then(|i| (count > 0).then(|| i.min(count - 1)));
            removed
        }),

        // Cover image
        Message::StartImagePrompt => {
            if let Some(editor) = model.editor_mut()
                && editor.loading.is_none()
                && !editor.busy.uploading
            {
                editor.image_prompt = Some(String::new());
            }
        }
        Message::ImagePromptInput(ch) => {
            if let Some(prompt) = model.editor_mut().and_then(|e| e.image_prompt.as_mut()) {
                prompt.push(ch);
            }
        }
        Message::ImagePromptBackspace => {
            if let Some(prompt) = model.editor_mut().and_then(|e| e.image_prompt.as_mut()) {
                prompt.pop();
            }
        }
        Message::CancelImagePrompt => {
            if let Some(editor) = model.editor_mut() {
                editor.image_prompt = None;
            }
        }
        Message::SubmitImagePath => {
            let picked = model.editor_mut().and_then(|editor| {
                let raw = editor.image_prompt.take()?;
                let path = expand_home(raw.trim())?;
                Some((editor.session, path))
            });
            if let Some((session, path)) = picked {
                model.push_request(Request::InspectImage { session, path });
            }
        }
        Message::ImageInspected { session, result } => {
            image_inspected(&mut model, session, result);
        }
        Message::ImageUploaded { session, result } => {
            let now_ms = model.clock_ms;
            let Some(editor) = session_editor(&mut model, session) else {
                return model;
            };
            editor.busy.uploading = false;
            match result {
                Ok(url) => {
                    editor.state.set_image(url);
                    editor.autosave.note_change(now_ms);
                    model.show_toast(ToastLevel::Info, "Image uploaded");
                }
                Err(err) => report_failure(&mut model, &err),
            }
        }
        Message::RemoveImage => {
            let removed = model.editor().is_some_and(|editor| {
                editor.loading.is_none() && editor.state.draft().image_url.is_some()
            });
            if removed {
                edit(&mut model, |editor| {
                    editor.state.clear_image();
                    true
                });
                model.show_toast(ToastLevel::Info, "Image removed");
            }
        }

        // Editor actions
        Message::SaveDraft => {
            let Some(editor) = model.editor_mut() else {
                return model;
            };
            if editor.loading.is_some() || editor.busy.saving {
                return model;
            }
            match editor.state.prepare_save_draft() {
                Ok(draft) => {
                    editor.busy.saving = true;
                    let session = editor.session;
                    model.push_request(Request::SaveDraft { session, draft });
                }
                Err(err) => show_validation(&mut model, &err),
            }
        }
        Message::DraftSaved { session, result } => {
            let Some(editor) = session_editor(&mut model, session) else {
                return model;
            };
            editor.busy.saving = false;
            match result {
                Ok(post) => {
                    editor.body.replace_text(&post.body);
                    editor.state.apply_saved(post, Local::now());
                    editor.autosave.mark_saved(editor.state.draft().clone());
                    tracing::info!(id = ?editor.state.draft().id, "draft saved");
                    model.show_toast(ToastLevel::Info, "Draft saved");
                }
                Err(err) => report_failure(&mut model, &err),
            }
        }
        Message::Publish => {
            let Some(editor) = model.editor_mut() else {
                return model;
            };
            if editor.loading.is_some() || editor.busy.publishing {
                return model;
            }
            match editor.state.prepare_publish() {
                Ok(draft) => {
                    editor.busy.publishing = true;
                    let session = editor.session;
                    model.push_request(Request::Publish { session, draft });
                }
                Err(err) => show_validation(&mut model, &err),
            }
        }
        Message::Published { session, result } => {
            let Some(editor) = session_editor(&mut model, session) else {
                return model;
            };
            editor.busy.publishing = false;
            match result {
                Ok(post) => {
                    tracing::info!(id = %post.id, "post published");
                    model.show_toast(ToastLevel::Info, "Blog published");
                    navigate(&mut model, Route::View(post.id));
                }
                Err(err) => report_failure(&mut model, &err),
            }
        }
        Message::RequestDelete => request_delete(&mut model),
        Message::ConfirmDelete => {
            if let Some(Confirm::DeletePost(id)) = model.confirm.take() {
                if let Some(editor) = model.editor_mut() {
                    editor.busy.deleting = true;
                }
                model.push_request(Request::Delete(id));
            }
        }
        Message::CancelConfirm => {
            model.confirm = None;
        }
        Message::Deleted { id, result } => {
            if let Some(editor) = model.editor_mut() {
                editor.busy.deleting = false;
            }
            match result {
                Ok(()) => {
                    tracing::info!(%id, "post deleted");
                    model.show_toast(ToastLevel::Info, "Blog deleted");
                    let showing = match model.route() {
                        Route::View(current) | Route::Editor(Some(current)) => current == id,
                        Route::List | Route::Editor(None) => false,
                    };
                    if showing {
                        navigate(&mut model, Route::List);
                    }
                }
                Err(err) => report_failure(&mut model, &err),
            }
        }
        Message::LeaveEditor => {
            let Some(editor) = model.editor_mut() else {
                return model;
            };
            if editor.has_unsaved_changes() && !editor.exit_confirmed {
                editor.exit_confirmed = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Esc again to discard, or Ctrl+S to save",
                );
                return model;
            }
            let back = editor.state.draft().id.map_or(Route::List, Route::View);
            navigate(&mut model, back);
        }

        // Results
        Message::PostsLoaded { request, result } => match &mut model.screen {
            Screen::List(list) if list.request == request => match result {
                Ok(posts) => {
                    tracing::debug!(count = posts.len(), "posts loaded");
                    list.posts = Loadable::Ready(posts);
                    list.clamp_selection();
                }
                Err(err) => {
                    tracing::warn!(error = %err, "post list fetch failed");
                    list.posts = Loadable::Failed;
                }
            },
            _ => tracing::debug!(request = request.get(), "dropping stale post list"),
        },
        Message::PostLoaded { request, result } => {
            let (width, height) = (model.size.0, model.content_height());
            match &mut model.screen {
                Screen::View(view) if view.request == request => {
                    view.post = match result {
                        Ok(post) => Loadable::Ready(post),
                        Err(err) => {
                            tracing::warn!(error = %err, id = %view.id, "post fetch failed");
                            Loadable::Failed
                        }
                    };
                    reflow_view(view, width, height);
                }
                _ => tracing::debug!(request = request.get(), "dropping stale post"),
            }
        }
        Message::EditorPostLoaded { request, result } => {
            let Some(editor) = model
                .editor_mut()
                .filter(|editor| editor.loading == Some(request))
            else {
                tracing::debug!(request = request.get(), "dropping stale editor load");
                return model;
            };
            editor.loading = None;
            match result {
                Ok(post) => editor.load_post(post),
                Err(err) => {
                    tracing::warn!(error = %err, "loading post for editing failed");
                    model.show_toast(ToastLevel::Error, "Failed to load blog");
                }
            }
        }
        Message::AutoSaveFinished {
            session,
            ticket,
            result,
        } => auto_save_finished(&mut model, session, ticket, result),

        // Clock and window
        Message::Tick(now_ms) => {
            model.clock_ms = now_ms;
            poll_auto_save(&mut model);
        }
        Message::Resize(width, height) => {
            model.size = (width, height);
            let content_height = model.content_height();
            match &mut model.screen {
                Screen::View(view) => reflow_view(view, width, content_height),
                Screen::Editor(editor) => {
                    ensure_cursor_visible(editor, crate::ui::editor_body_rows(content_height));
                }
                Screen::List(_) => {}
            }
        }

        // Application
        Message::Quit => {
            if model.editor_is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                if let Some(editor) = model.editor_mut() {
                    editor.autosave.shutdown();
                }
                model.should_quit = true;
            }
        }
    }
    model
}

/// Unmount the current screen and mount the one for `route`, queueing its
/// initial fetch.
fn navigate(model: &mut Model, route: Route) {
    if let Some(editor) = model.editor_mut() {
        editor.autosave.shutdown();
    }
    model.confirm = None;
    tracing::debug!(?route, "navigate");
    match route {
        Route::List => {
            let request = model.next_request_id();
            model.screen = Screen::List(ListScreen {
                request,
                ..ListScreen::default()
            });
            model.push_request(Request::ListPosts(request));
        }
        Route::View(id) => {
            let request = model.next_request_id();
            model.screen = Screen::View(ViewScreen {
                id,
                post: Loadable::Loading,
                viewport: Viewport::new(model.size.0, model.content_height(), 0),
                request,
            });
            model.push_request(Request::GetPost(request, id));
        }
        Route::Editor(id) => {
            let session = model.next_request_id();
            let mut editor = EditorScreen::new(session, model.autosave_config, model.clock_ms);
            if let Some(id) = id {
                let request = model.next_request_id();
                editor.loading = Some(request);
                model.push_request(Request::LoadForEdit(request, id));
            }
            model.screen = Screen::Editor(Box::new(editor));
        }
    }
}

fn selected_post_id(model: &Model) -> Option<PostId> {
    match &model.screen {
        Screen::List(list) => list.selected_post().map(|post| post.id),
        Screen::View(view) => view.post.ready().map(|post| post.id),
        Screen::Editor(_) => None,
    }
}

fn with_view(model: &mut Model, f: impl FnOnce(&mut Viewport)) {
    if let Screen::View(view) = &mut model.screen {
        f(&mut view.viewport);
    }
}

/// The editor screen for `session`, if it is still mounted.
fn session_editor(model: &mut Model, session: RequestId) -> Option<&mut EditorScreen> {
    let editor = model.editor_mut().filter(|editor| editor.session == session);
    if editor.is_none() {
        tracing::debug!(session = session.get(), "dropping result for closed editor");
    }
    editor
}

/// Apply a draft change; `f` reports whether anything changed.
fn edit(model: &mut Model, f: impl FnOnce(&mut EditorScreen) -> bool) {
    let now_ms = model.clock_ms;
    let Some(editor) = model.editor_mut() else {
        return;
    };
    if editor.loading.is_some() {
        return;
    }
    if f(editor) {
        editor.autosave.note_change(now_ms);
    }
}

/// Apply a body buffer change and copy the text into the draft.
fn edit_body(model: &mut Model, f: impl FnOnce(&mut EditorScreen) -> bool) {
    let rows = crate::ui::editor_body_rows(model.content_height());
    edit(model, |editor| {
        let changed = f(editor);
        if changed {
            editor.state.set_body(editor.body.text());
        }
        ensure_cursor_visible(editor, rows);
        changed
    });
}

fn move_body(model: &mut Model, f: impl FnOnce(&mut EditorScreen)) {
    let rows = crate::ui::editor_body_rows(model.content_height());
    if let Some(editor) = model.editor_mut() {
        f(editor);
        ensure_cursor_visible(editor, rows);
    }
}

/// Ensure the body cursor line is inside the visible rows.
fn ensure_cursor_visible(editor: &mut EditorScreen, rows: u16) {
    let cursor_line = editor.body.cursor().line;
    let visible_height = usize::from(rows);
    if visible_height == 0 {
        editor.body_scroll = cursor_line;
        return;
    }
    if cursor_line < editor.body_scroll {
        editor.body_scroll = cursor_line;
    } else if cursor_line >= editor.body_scroll + visible_height {
        editor.body_scroll = cursor_line + 1 - visible_height;
    }
}

fn reflow_view(view: &mut ViewScreen, width: u16, height: u16) {
    let total = view
        .post
        .ready()
        .map_or(0, |post| crate::ui::post_view_height(post, width));
    view.viewport.resize(width, height);
    view.viewport.set_total_lines(total);
}

fn expand_home(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() {
        return None;
    }
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return Some(PathBuf::from(home).join(rest));
    }
    Some(PathBuf::from(raw))
}

fn image_inspected(
    model: &mut Model,
    session: RequestId,
    result: Result<ImageSelection, ApiError>,
) {
    let Some(editor) = session_editor(model, session) else {
        return;
    };
    let image = match result {
        Ok(image) => image,
        Err(err) => {
            report_failure(model, &err);
            return;
        }
    };
    if let Err(err) = image.validate() {
        show_validation(model, &err);
        return;
    }
    if editor.busy.uploading {
        return;
    }
    editor.busy.uploading = true;
    tracing::debug!(file = %image.file_name, size = image.size, "uploading cover image");
    model.push_request(Request::UploadImage { session, image });
}

fn request_delete(model: &mut Model) {
    let target = match &model.screen {
        Screen::Editor(editor) => {
            if editor.busy.blocks_delete() {
                return;
            }
            editor.state.prepare_delete()
        }
        Screen::View(view) if view.post.ready().is_some() => Ok(view.id),
        Screen::View(_) | Screen::List(_) => return,
    };
    match target {
        Ok(id) => model.confirm = Some(Confirm::DeletePost(id)),
        Err(err) => show_validation(model, &err),
    }
}

fn auto_save_finished(
    model: &mut Model,
    session: RequestId,
    ticket: SaveTicket<Draft>,
    result: Result<Post, ApiError>,
) {
    let Some(editor) = session_editor(model, session) else {
        return;
    };
    let sent = ticket.snapshot().clone();
    editor.autosave.finish(ticket, result.as_ref().map(|_| ()));
    let Ok(post) = result else {
        return;
    };
    let adopting = editor.state.draft().id.is_none();
    editor.state.apply_auto_saved(Some(post.id), Local::now());
    if adopting {
        let mut saved = sent;
        saved.id = Some(post.id);
        if *editor.state.draft() == saved {
            editor.autosave.mark_saved(saved);
        }
    }
}

fn poll_auto_save(model: &mut Model) {
    let now_ms = model.clock_ms;
    let Some(editor) = model.editor_mut() else {
        return;
    };
    if editor.loading.is_some() {
        return;
    }
    let mut requests = Vec::new();
    while let Some(trigger) = editor.autosave.poll(now_ms) {
        // The service rejects untitled drafts. The trigger is spent, but the
        // draft stays unsaved.
        if editor.state.draft().title.is_empty() {
            tracing::trace!(?trigger, "auto-save skipped: untitled");
            continue;
        }
        let Some(ticket) = editor.autosave.attempt(editor.state.draft(), trigger) else {
            continue;
        };
        requests.push(Request::AutoSave {
            session: editor.session,
            ticket,
        });
    }
    for request in requests {
        model.push_request(request);
    }
}

fn show_validation(model: &mut Model, err: &ValidationError) {
    model.show_toast(ToastLevel::Warning, err.to_string());
}

fn report_failure(model: &mut Model, err: &ApiError) {
    tracing::warn!(error = %err, "request failed");
    model.show_toast(ToastLevel::Error, err.to_string());
}
