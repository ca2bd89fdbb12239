use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::style::Palette;

pub fn render_help_overlay(model: &Model, palette: Palette, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = palette.section();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Posts", section_style));
    lines.push(Line::raw("  j/k or Up/Down      Move selection / scroll"));
    lines.push(Line::raw("  Tab                 Published / drafts"));
    lines.push(Line::raw("  Enter               Open post"));
    lines.push(Line::raw("  e                   Edit post"));
    lines.push(Line::raw("  n                   New post"));
    lines.push(Line::raw("  d                   Delete post (view)"));
    lines.push(Line::raw("  Space/b, g/G        Page, top / bottom (view)"));
    lines.push(Line::raw("  r                   Refresh"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Editor", section_style));
    lines.push(Line::raw("  Tab / Shift+Tab     Next / previous field"));
    lines.push(Line::raw("  Ctrl+S              Save draft"));
    lines.push(Line::raw("  Ctrl+P              Publish"));
    lines.push(Line::raw("  Ctrl+D              Delete"));
    lines.push(Line::raw("  Ctrl+O / Ctrl+X     Add / remove cover image"));
    lines.push(Line::raw("  Enter (tags)        Add tag"));
    lines.push(Line::raw("  Left/Right, Delete  Select / remove tag"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Body start / end"));
    lines.push(Line::raw("  Esc                 Leave editor"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  Ctrl+T              Toggle theme"));
    lines.push(Line::raw("  q / Ctrl+C / Ctrl+Q Quit"));
    lines.push(Line::raw("  ? / F1              Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Service: {}", model.api_url)));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(palette.popup());

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_confirm_overlay(palette: Palette, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(36, 5, area);
    let block = Block::default()
        .title("Confirm")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(palette.popup());
    let text = vec![
        Line::raw("Delete this post? (y/n)"),
        Line::styled("This cannot be undone.", palette.dim()),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(block), popup);
}

pub fn render_image_prompt(prompt: &str, palette: Palette, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(area.width.saturating_sub(8).max(40), 5, area);
    let block = Block::default()
        .title("Cover image path")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(palette.popup());
    let text = vec![
        Line::from(vec![
            Span::raw(prompt.to_string()),
            Span::styled(" ", palette.cursor()),
        ]),
        Line::styled("Enter: upload  Esc: cancel  (images up to 5MB)", palette.dim()),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
