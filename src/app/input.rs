use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model, Route};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;
use super::model::{EditorFocus, EditorScreen, Screen};

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(key, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(w, h) => {
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    fn handle_paste(text: String, model: &Model) -> Option<Message> {
        let editor = model.editor()?;
        if editor.image_prompt.is_some() || editor.focus != EditorFocus::Body {
            return None;
        }
        Some(Message::EditorPaste(text))
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key.code, KeyCode::Char('q' | 'c')) {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Some(Message::ConfirmDelete),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Message::CancelConfirm),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('t') if ctrl => return Some(Message::ToggleTheme),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            _ => {}
        }

        match &model.screen {
            Screen::List(_) => list_key(key),
            Screen::View(_) => view_key(key),
            Screen::Editor(editor) => editor_key(key, editor),
        }
    }
}

fn list_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Message::ListDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::ListUp),
        KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Char('h' | 'l')
        | KeyCode::Left
        | KeyCode::Right => Some(Message::ListNextTab),
        KeyCode::Enter => Some(Message::OpenSelected),
        KeyCode::Char('e') => Some(Message::EditSelected),
        KeyCode::Char('n') => Some(Message::Navigate(Route::Editor(None))),
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

fn view_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
        KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
        KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
        KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
        KeyCode::Char('e') => Some(Message::EditSelected),
        KeyCode::Char('d') => Some(Message::RequestDelete),
        KeyCode::Esc | KeyCode::Backspace => Some(Message::Navigate(Route::List)),
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

fn editor_key(key: KeyEvent, editor: &EditorScreen) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if editor.image_prompt.is_some() {
        return match key.code {
            KeyCode::Esc => Some(Message::CancelImagePrompt),
            KeyCode::Enter => Some(Message::SubmitImagePath),
            KeyCode::Backspace => Some(Message::ImagePromptBackspace),
            KeyCode::Char(c) if !ctrl => Some(Message::ImagePromptInput(c)),
            _ => None,
        };
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('s') => Some(Message::SaveDraft),
            KeyCode::Char('p') => Some(Message::Publish),
            KeyCode::Char('d') => Some(Message::RequestDelete),
            KeyCode::Char('o') => Some(Message::StartImagePrompt),
            KeyCode::Char('x') => Some(Message::RemoveImage),
            KeyCode::Left if editor.focus == EditorFocus::Body => {
                Some(Message::EditorMoveWordLeft)
            }
            KeyCode::Right if editor.focus == EditorFocus::Body => {
                Some(Message::EditorMoveWordRight)
            }
            KeyCode::Home if editor.focus == EditorFocus::Body => Some(Message::EditorMoveToStart),
            KeyCode::End if editor.focus == EditorFocus::Body => Some(Message::EditorMoveToEnd),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => return Some(Message::LeaveEditor),
        KeyCode::Tab => return Some(Message::FocusNext),
        KeyCode::BackTab => return Some(Message::FocusPrev),
        _ => {}
    }

    match editor.focus {
        EditorFocus::Title => match key.code {
            KeyCode::Char(c) => Some(Message::TitleInput(c)),
            KeyCode::Backspace => Some(Message::TitleBackspace),
            KeyCode::Enter | KeyCode::Down => Some(Message::FocusNext),
            _ => None,
        },
        EditorFocus::Body => body_key(key),
        EditorFocus::Tags => tags_key(key, editor),
    }
}

fn body_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char(c) => Some(Message::EditorInsertChar(c)),
        KeyCode::Enter => Some(Message::EditorSplitLine),
        KeyCode::Backspace => Some(Message::EditorDeleteBack),
        KeyCode::Delete => Some(Message::EditorDeleteForward),
        KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
        KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
        KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
        KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
        KeyCode::Home => Some(Message::EditorMoveHome),
        KeyCode::End => Some(Message::EditorMoveEnd),
        KeyCode::PageUp => Some(Message::EditorScrollUp(10)),
        KeyCode::PageDown => Some(Message::EditorScrollDown(10)),
        _ => None,
    }
}

fn tags_key(key: KeyEvent, editor: &EditorScreen) -> Option<Message> {
    let count = editor.state.draft().tags.len();
    match key.code {
        KeyCode::Char(c) => Some(Message::TagInput(c)),
        KeyCode::Backspace => Some(Message::TagBackspace),
        KeyCode::Enter => Some(Message::CommitTag),
        KeyCode::Left if count > 0 => Some(Message::SelectTag(Some(
            editor
                .selected_tag
                .map_or(count - 1, |i| i.saturating_sub(1)),
        ))),
        KeyCode::Right => Some(Message::SelectTag(
            editor.selected_tag.and_then(|i| (i + 1 < count).then_some(i + 1)),
        )),
        KeyCode::Delete => {
            let tag = editor.selected_tag.and_then(|i| editor.state.draft().tags.get(i))?;
            Some(Message::RemoveTag(tag.clone()))
        }
        _ => None,
    }
}
