use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{EditorFocus, EditorScreen};
use crate::editor::BodyBuffer;

use super::style::Palette;
use super::wrap::truncate_to_width;

/// Rows of the editor outside the body text: title box (3), cover image
/// line (1), tags box (3) and the body box borders (2).
const EDITOR_CHROME_ROWS: u16 = 9;

/// Visible body rows for a content area `content_height` rows tall.
pub const fn editor_body_rows(content_height: u16) -> u16 {
    content_height.saturating_sub(EDITOR_CHROME_ROWS)
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else {
        5
    }
}

pub(super) fn render_editor(editor: &EditorScreen, palette: Palette, frame: &mut Frame, area: Rect) {
    let [title_area, image_area, body_area, tags_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(2),
        Constraint::Length(3),
    ])
    .areas(area);

    let focused = |focus: EditorFocus| editor.focus == focus && editor.image_prompt.is_none();
    let draft = editor.state.draft();

    let title_line = if editor.loading.is_some() {
        Line::styled("Loading...", palette.dim())
    } else if focused(EditorFocus::Title) {
        let mut spans = vec![Span::raw(draft.title.clone())];
        spans.push(Span::styled(" ", palette.cursor()));
        Line::from(spans)
    } else if draft.title.is_empty() {
        Line::styled("Untitled", palette.dim())
    } else {
        Line::raw(draft.title.clone())
    };
    frame.render_widget(
        Paragraph::new(title_line).block(field_block(" Title ", focused(EditorFocus::Title), palette)),
        title_area,
    );

    let image_line = draft.image_url.as_ref().map_or_else(
        || Line::styled(" No cover image (Ctrl+O to add)", palette.dim()),
        |url| {
            Line::from(vec![
                Span::styled(" Cover image: ", palette.dim()),
                Span::raw(truncate_to_width(
                    url,
                    usize::from(image_area.width).saturating_sub(30),
                )),
                Span::styled("  (Ctrl+X to remove)", palette.dim()),
            ])
        },
    );
    let image_line = if editor.busy.uploading {
        Line::styled(" Uploading image...", palette.dim())
    } else {
        image_line
    };
    frame.render_widget(Paragraph::new(image_line), image_area);

    let body_block = field_block(" Content ", focused(EditorFocus::Body), palette);
    let body_inner = body_block.inner(body_area);
    frame.render_widget(body_block, body_area);
    if editor.loading.is_none() {
        let lines = body_lines(
            &editor.body,
            editor.body_scroll,
            usize::from(body_inner.height),
            focused(EditorFocus::Body),
            palette,
        );
        frame.render_widget(Paragraph::new(lines), body_inner);
    }

    let mut tag_spans: Vec<Span> = Vec::new();
    for (i, tag) in draft.tags.iter().enumerate() {
        let style = if editor.selected_tag == Some(i) && focused(EditorFocus::Tags) {
            palette.tag().reversed()
        } else {
            palette.tag()
        };
        tag_spans.push(Span::styled(format!("#{tag}"), style));
        tag_spans.push(Span::raw(" "));
    }
    tag_spans.push(Span::raw(editor.tag_input.clone()));
    if focused(EditorFocus::Tags) {
        tag_spans.push(Span::styled(" ", palette.cursor()));
    } else if draft.tags.is_empty() && editor.tag_input.is_empty() {
        tag_spans.push(Span::styled("Add tags, Enter to commit", palette.dim()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(tag_spans)).block(field_block(
            " Tags ",
            focused(EditorFocus::Tags),
            palette,
        )),
        tags_area,
    );
}

fn field_block(title: &str, focused: bool, palette: Palette) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(palette.border(focused))
}

fn body_lines(
    body: &BodyBuffer,
    scroll: usize,
    rows: usize,
    show_cursor: bool,
    palette: Palette,
) -> Vec<Line<'static>> {
    let total_lines = body.line_count();
    let gutter_width = usize::from(line_number_width(total_lines));
    let cursor = body.cursor();
    let end = (scroll + rows).min(total_lines);

    (scroll..end)
        .map(|line_idx| {
            let text = body.line_at(line_idx).unwrap_or_default();
            let mut spans = vec![Span::styled(
                format!("{:>gutter_width$} ", line_idx + 1),
                palette.dim(),
            )];
            if show_cursor && line_idx == cursor.line {
                spans.extend(cursor_spans(&text, cursor.col, palette));
            } else {
                spans.push(Span::raw(text));
            }
            Line::from(spans)
        })
        .collect()
}

/// Split a line around the cursor cell, which is drawn reversed.
fn cursor_spans(text: &str, col: usize, palette: Palette) -> Vec<Span<'static>> {
    let mut col = col.min(text.len());
    while !text.is_char_boundary(col) {
        col -= 1;
    }
    let (before, rest) = text.split_at(col);
    let mut chars = rest.chars();
    let under = chars.next().map_or_else(|| " ".to_string(), String::from);
    let after = chars.as_str();

    let mut spans = Vec::with_capacity(3);
    if !before.is_empty() {
        spans.push(Span::raw(before.to_string()));
    }
    spans.push(Span::styled(under, palette.cursor()));
    if !after.is_empty() {
        spans.push(Span::raw(after.to_string()));
    }
    spans
}
