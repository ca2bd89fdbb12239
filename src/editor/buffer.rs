use std::borrow::Cow;

use ropey::Rope;

/// Cursor position in the body buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based byte offset within the line.
    pub col: usize,
    /// Column to return to when moving vertically through short lines.
    sticky_col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky_col: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.sticky_col = col;
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Multi-line text of a post body, backed by a rope.
#[derive(Clone)]
pub struct BodyBuffer {
    rope: Rope,
    cursor: Cursor,
}

impl BodyBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&normalize_line_endings(text)),
            cursor: Cursor::default(),
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its line ending.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Byte length of a line without its line ending.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Swap in new text, keeping the cursor as close to where it was as the
    /// new text allows.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(&normalize_line_endings(text));
        let line = self.cursor.line.min(self.line_count().saturating_sub(1));
        let col = self.cursor.col.min(self.line_len(line));
        let col = self.floor_char_boundary(line, col);
        self.cursor = Cursor::at(line, col);
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.cursor_char_idx();
        self.rope.insert_char(idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
    }

    /// Insert text (e.g. a paste) at the cursor; the cursor ends after it.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let s = normalize_line_endings(s);
        let idx = self.cursor_char_idx();
        self.rope.insert(idx, &s);
        match s.rsplit_once('\n') {
            Some((_, tail)) => {
                self.cursor.line += s.matches('\n').count();
                self.cursor.set_col(tail.len());
            }
            None => self.cursor.set_col(self.cursor.col + s.len()),
        }
    }

    /// Break the line at the cursor (Enter).
    pub fn split_line(&mut self) {
        let idx = self.cursor_char_idx();
        self.rope.insert_char(idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
    }

    /// Delete the character before the cursor, joining lines at column 0.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }
        let idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            self.rope.remove(idx - 1..idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            let prev_len = self.prev_char_len();
            self.rope.remove(idx - 1..idx);
            self.cursor.set_col(self.cursor.col - prev_len);
        }
        true
    }

    /// Delete the character under the cursor, joining lines at line end.
    pub fn delete_forward(&mut self) -> bool {
        let at_line_end = self.cursor.col >= self.line_len(self.cursor.line);
        if at_line_end && self.cursor.line + 1 >= self.line_count() {
            return false;
        }
        let idx = self.cursor_char_idx();
        self.rope.remove(idx..=idx);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.cursor.col > 0 {
                    let len = self.prev_char_len();
                    self.cursor.set_col(self.cursor.col - len);
                } else if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.cursor.set_col(self.line_len(self.cursor.line));
                }
            }
            Direction::Right => {
                let line = self.line_at(self.cursor.line).unwrap_or_default();
                if let Some(ch) = line[self.cursor.col.min(line.len())..].chars().next() {
                    self.cursor.set_col(self.cursor.col + ch.len_utf8());
                } else if self.cursor.line + 1 < self.line_count() {
                    self.cursor.line += 1;
                    self.cursor.set_col(0);
                }
            }
            Direction::Up if self.cursor.line > 0 => self.move_vertically(self.cursor.line - 1),
            Direction::Down if self.cursor.line + 1 < self.line_count() => {
                self.move_vertically(self.cursor.line + 1);
            }
            Direction::Up | Direction::Down => {}
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        self.cursor.set_col(self.line_len(self.cursor.line));
    }

    /// Move to the start of the previous word, crossing line starts.
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = line[..self.cursor.col].trim_end();
        let start = before.rfind(|c: char| !is_word_char(c)).map_or(0, |i| {
            i + before[i..].chars().next().map_or(1, char::len_utf8)
        });
        self.cursor.set_col(start);
    }

    /// Move past the current word and the separators after it.
    pub fn move_word_right(&mut self) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        if self.cursor.col >= line.len() {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }
        let after = &line[self.cursor.col..];
        let word_end = after.find(|c: char| !is_word_char(c)).unwrap_or(after.len());
        let rest = &after[word_end..];
        let gap = rest.find(is_word_char).unwrap_or(rest.len());
        self.cursor.set_col(self.cursor.col + word_end + gap);
    }

    pub const fn move_to_start(&mut self) {
        self.cursor = Cursor::at(0, 0);
    }

    pub fn move_to_end(&mut self) {
        let last = self.line_count().saturating_sub(1);
        self.cursor = Cursor::at(last, self.line_len(last));
    }

    fn move_vertically(&mut self, line: usize) {
        self.cursor.line = line;
        let col = self.cursor.sticky_col.min(self.line_len(line));
        self.cursor.col = self.floor_char_boundary(line, col);
    }

    fn prev_char_len(&self) -> usize {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        line[..self.cursor.col.min(line.len())]
            .chars()
            .next_back()
            .map_or(1, char::len_utf8)
    }

    fn floor_char_boundary(&self, line: usize, col: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let mut col = col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        col
    }

    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let col = self.cursor.col.min(line.len());
        line_start + line[..col].chars().count()
    }
}

/// The buffer only ever holds `\n` line breaks.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for BodyBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyBuffer")
            .field("rope", &format_args!("Rope({} lines)", self.rope.len_lines()))
            .field("cursor", &self.cursor)
            .finish()
    }
}
