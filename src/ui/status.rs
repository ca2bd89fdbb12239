use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{EditorScreen, Loadable, Model, Screen};

use super::style::{Palette, toast_style};

pub fn render_status_bar(model: &Model, palette: Palette, frame: &mut Frame, area: Rect) {
    let status = match &model.screen {
        Screen::List(list) => {
            let count = match &list.posts {
                Loadable::Ready(posts) => format!("{} posts", posts.len()),
                Loadable::Loading => "loading".to_string(),
                Loadable::Failed => "offline".to_string(),
            };
            format!(" {count}  j/k:move  Tab:drafts  Enter:open  e:edit  n:new  r:refresh  q:quit")
        }
        Screen::View(view) => format!(
            " [{}%]  e:edit  d:delete  Esc:back  r:refresh",
            view.viewport.scroll_percent()
        ),
        Screen::Editor(editor) => editor_status(editor),
    };
    frame.render_widget(Paragraph::new(status).style(palette.bar()), area);
}

fn editor_status(editor: &EditorScreen) -> String {
    let dirty = if editor.has_unsaved_changes() {
        " [modified]"
    } else {
        ""
    };
    let cursor = editor.body.cursor();
    let saved = editor.state.last_saved_at().map_or_else(String::new, |at| {
        format!("  Last saved: {}", at.format("%H:%M:%S"))
    });
    let busy = if editor.busy.deleting {
        "  Deleting..."
    } else if editor.busy.publishing {
        "  Publishing..."
    } else if editor.busy.saving {
        "  Saving..."
    } else {
        ""
    };
    format!(
        " EDIT{dirty}  Ln {}, Col {}{saved}{busy}  Ctrl+S:save  Ctrl+P:publish  Esc:back",
        cursor.line + 1,
        cursor.col + 1
    )
}

pub fn render_toast_bar(model: &Model, palette: Palette, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = toast_style(level, palette);
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
