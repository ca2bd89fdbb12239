//! Display-width aware word wrapping for post text.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap `text` to lines no wider than `width` columns.
///
/// Breaks at whitespace; a word wider than the line is split by character.
/// Leading whitespace at wrapped line starts is dropped. An empty input
/// yields one empty line.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for token in split_tokens(text) {
        let token_width = token.width();
        let is_ws = token.chars().all(char::is_whitespace);

        if current_width + token_width > width && current_width > 0 {
            lines.push(std::mem::take(&mut current).trim_end().to_string());
            current_width = 0;
        }
        if is_ws && current_width == 0 {
            continue;
        }
        if token_width > width {
            for ch in token.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            continue;
        }
        current.push_str(token);
        current_width += token_width;
    }

    lines.push(current.trim_end().to_string());
    lines
}

/// Cut `text` to at most `max` columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0usize;
    let mut in_ws: Option<bool> = None;
    for (idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        match in_ws {
            Some(state) if state != is_ws => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_ws = Some(is_ws);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
