use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

// ---------------------------------------------------------------------------
// Single-line input
// ---------------------------------------------------------------------------

/// A single-line text input with a byte-offset cursor.
#[derive(Debug, Clone, Default)]
pub struct EditLine {
    text: String,
    cursor: usize,
}

impl EditLine {
    pub fn new() -> Self {
        EditLine::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        EditLine { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the contents, cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Cursor position in display cells.
    pub fn cursor_col(&self) -> usize {
        unicode::byte_to_col(&self.text, self.cursor)
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Apply an editing key. Returns false for keys the input does not
    /// handle (so callers can route them elsewhere).
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if is_plain_char(key.modifiers, c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Multi-line editor
// ---------------------------------------------------------------------------

/// A small multi-line text editor. Lines are separated by `\n` internally;
/// callers normalize on save.
#[derive(Debug, Clone, Default)]
pub struct TextEdit {
    text: String,
    cursor: usize,
    /// Preferred column for vertical movement across short lines
    goal_col: Option<usize>,
}

impl TextEdit {
    pub fn new() -> Self {
        TextEdit::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into().replace("\r\n", "\n");
        let cursor = text.len();
        TextEdit {
            text,
            cursor,
            goal_col: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    /// Cursor position as (line index, display column).
    pub fn cursor_position(&self) -> (usize, usize) {
        let line = self.text[..self.cursor].matches('\n').count();
        let start = self.line_start(self.cursor);
        let col = unicode::byte_to_col(&self.text[start..], self.cursor - start);
        (line, col)
    }

    fn line_start(&self, at: usize) -> usize {
        self.text[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, at: usize) -> usize {
        self.text[at..]
            .find('\n')
            .map(|i| at + i)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.goal_col = None;
    }

    pub fn insert_newline(&mut self) {
        self.insert('\n');
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
        self.goal_col = None;
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.drain(self.cursor..next);
        }
        self.goal_col = None;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
        self.goal_col = None;
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
        self.goal_col = None;
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
        self.goal_col = None;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
        self.goal_col = None;
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let col = self.remembered_col(start);
        let prev_start = self.line_start(start - 1);
        let prev_line = &self.text[prev_start..start - 1];
        self.cursor = prev_start + unicode::col_to_byte(prev_line, col);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            return;
        }
        let start = self.line_start(self.cursor);
        let col = self.remembered_col(start);
        let next_start = end + 1;
        let next_line = &self.text[next_start..self.line_end(next_start)];
        self.cursor = next_start + unicode::col_to_byte(next_line, col);
    }

    /// Column to aim for when moving vertically: the sticky goal column if
    /// one is set, else the current column (which becomes the goal).
    fn remembered_col(&mut self, line_start: usize) -> usize {
        let current = unicode::byte_to_col(&self.text[line_start..], self.cursor - line_start);
        *self.goal_col.get_or_insert(current)
    }

    /// Apply an editing key. Returns false for keys the editor does not
    /// handle.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if is_plain_char(key.modifiers, c) => self.insert(c),
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

/// A printable keypress with no control/alt chord held.
fn is_plain_char(modifiers: KeyModifiers, c: char) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) && !c.is_control()
}
