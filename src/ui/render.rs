use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Tabs};

use crate::app::{ListScreen, ListTab, Loadable, Model, Screen, ViewScreen};
use crate::config::ThemeMode;
use crate::post::{Post, excerpt};

use super::style::Palette;
use super::wrap::{truncate_to_width, wrap_words};
use super::{CONTENT_LEFT_PADDING, editor, overlays, status};

/// Rows taken by one post entry in the list, including the spacer.
const LIST_ENTRY_ROWS: usize = 4;

/// Columns available to wrapped text for a terminal `width` columns wide.
pub fn content_width(width: u16) -> usize {
    usize::from(width.saturating_sub(CONTENT_LEFT_PADDING * 2).max(1))
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let palette = Palette::for_theme(model.theme);
    let toast_active = model.active_toast().is_some();
    let [header_area, content_area, toast_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(u16::from(toast_active)),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(model, palette, frame, header_area);
    frame.render_widget(Clear, content_area);
    match &model.screen {
        Screen::List(list) => render_list(list, palette, frame, content_area),
        Screen::View(view) => render_view(view, palette, frame, content_area),
        Screen::Editor(screen) => editor::render_editor(screen, palette, frame, content_area),
    }

    if toast_active {
        status::render_toast_bar(model, palette, frame, toast_area);
    }
    status::render_status_bar(model, palette, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, palette, frame, area);
    } else if model.confirm.is_some() {
        overlays::render_confirm_overlay(palette, frame, area);
    } else if let Some(prompt) = model.editor().and_then(|e| e.image_prompt.as_deref()) {
        overlays::render_image_prompt(prompt, palette, frame, area);
    }
}

fn render_header(model: &Model, palette: Palette, frame: &mut Frame, area: Rect) {
    let theme = model.theme.as_str();
    let left = format!(" BlogCraft \u{2502} {}", model.route().label());
    let right = format!("{theme}  Ctrl+T:theme  ?:help ");
    let gap = usize::from(area.width).saturating_sub(left.chars().count() + right.len());
    let text = format!("{left}{}{right}", " ".repeat(gap));
    frame.render_widget(
        Paragraph::new(text).style(palette.bar().add_modifier(Modifier::BOLD)),
        area,
    );
}

fn render_list(list: &ListScreen, palette: Palette, frame: &mut Frame, area: Rect) {
    let [tabs_area, body_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

    let (published, drafts) = list.counts();
    let selected_tab = match list.tab {
        ListTab::Published => 0,
        ListTab::Drafts => 1,
    };
    let tabs = Tabs::new(vec![
        format!("Published ({published})"),
        format!("Drafts ({drafts})"),
    ])
    .select(selected_tab)
    .style(palette.dim())
    .highlight_style(palette.title().add_modifier(Modifier::UNDERLINED))
    .block(Block::default().padding(Padding::left(CONTENT_LEFT_PADDING)));
    frame.render_widget(tabs, tabs_area);

    let block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(CONTENT_LEFT_PADDING));
    let inner_width = usize::from(block.inner(body_area).width);

    let lines: Vec<Line> = match &list.posts {
        Loadable::Loading => vec![Line::styled("Loading blogs...", palette.dim())],
        Loadable::Ready(_) | Loadable::Failed if list.visible_posts().is_empty() => vec![
            Line::raw("No blog posts found."),
            Line::styled("Press n to create a new post.", palette.dim()),
        ],
        Loadable::Ready(_) | Loadable::Failed => {
            let posts = list.visible_posts();
            let per_page = (usize::from(body_area.height) / LIST_ENTRY_ROWS).max(1);
            let start = list.selected.saturating_sub(per_page - 1);
            posts
                .iter()
                .enumerate()
                .skip(start)
                .take(per_page)
                .flat_map(|(i, post)| list_entry(post, i == list.selected, inner_width, palette))
                .collect()
        }
    };
    frame.render_widget(Paragraph::new(lines).block(block), body_area);
}

fn list_entry(post: &Post, selected: bool, width: usize, palette: Palette) -> Vec<Line<'static>> {
    let marker = if selected { "> " } else { "  " };
    let title_style = if selected {
        palette.title().reversed()
    } else {
        palette.title()
    };
    let mut title = vec![
        Span::styled(marker, palette.title()),
        Span::styled(
            truncate_to_width(display_title(post), width.saturating_sub(10)),
            title_style,
        ),
    ];
    if post.is_draft() {
        title.push(Span::raw(" "));
        title.push(Span::styled(" Draft ", palette.badge()));
    }

    let summary = excerpt(&post.body).replace('\n', " ");
    let mut meta: Vec<Span<'static>> = vec![Span::raw("  ")];
    if let Some(created) = post.created_at {
        meta.push(Span::styled(created.short_date(), palette.dim()));
        meta.push(Span::raw("  "));
    }
    meta.extend(tag_spans(&post.tags, palette));

    vec![
        Line::from(title),
        Line::from(vec![
            Span::raw("  "),
            Span::raw(truncate_to_width(&summary, width.saturating_sub(2))),
        ]),
        Line::from(meta),
        Line::raw(""),
    ]
}

fn tag_spans(tags: &[String], palette: Palette) -> Vec<Span<'static>> {
    tags.iter()
        .flat_map(|tag| [Span::styled(format!("#{tag}"), palette.tag()), Span::raw(" ")])
        .collect()
}

fn display_title(post: &Post) -> &str {
    if post.title.is_empty() {
        "(untitled)"
    } else {
        &post.title
    }
}

fn render_view(view: &ViewScreen, palette: Palette, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::horizontal(CONTENT_LEFT_PADDING));
    let lines = match &view.post {
        Loadable::Loading => vec![Line::styled("Loading blog...", palette.dim())],
        Loadable::Failed => vec![
            Line::raw("Blog post not found"),
            Line::styled("Press Esc to go back to the list.", palette.dim()),
        ],
        Loadable::Ready(post) => {
            let all = post_view_lines(post, area.width, palette);
            let range = view.viewport.visible_range();
            all.into_iter()
                .skip(range.start)
                .take(range.len())
                .collect()
        }
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The post page as wrapped lines for a terminal `width` columns wide.
pub fn post_view_lines(post: &Post, width: u16, palette: Palette) -> Vec<Line<'static>> {
    let wrap = content_width(width);
    let mut lines: Vec<Line<'static>> = wrap_words(display_title(post), wrap)
        .into_iter()
        .map(|line| Line::styled(line, palette.title()))
        .collect();

    let mut meta: Vec<Span<'static>> = Vec::new();
    if post.is_draft() {
        meta.push(Span::styled(" Draft ", palette.badge()));
        meta.push(Span::raw(" "));
    }
    if let Some(created) = post.created_at {
        meta.push(Span::styled(created.long_date(), palette.dim()));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }
    if let Some(url) = &post.image_url {
        for line in wrap_words(&format!("Cover image: {url}"), wrap) {
            lines.push(Line::styled(line, palette.dim()));
        }
    }
    lines.push(Line::raw(""));

    for paragraph in post.paragraphs() {
        lines.extend(wrap_words(paragraph, wrap).into_iter().map(Line::raw));
    }

    if !post.tags.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(tag_spans(&post.tags, palette)));
    }
    lines
}

/// Number of rows the post page takes at `width` columns.
pub fn post_view_height(post: &Post, width: u16) -> usize {
    post_view_lines(post, width, Palette::for_theme(ThemeMode::default())).len()
}
