use super::unicode::{display_width, next_grapheme_boundary, prev_grapheme_boundary};

/// Single-line text buffer with a grapheme-aware cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    /// Byte offset, always on a grapheme boundary
    cursor: usize,
}

impl LineInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        LineInput { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position in terminal cells
    pub fn cursor_col(&self) -> usize {
        display_width(&self.text[..self.cursor])
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, text: impl Into<String>) {
        *self = LineInput::new(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut input = LineInput::default();
        for c in "tsks".chars() {
            input.insert(c);
        }
        input.backspace();
        input.left();
        input.left();
        input.insert('a');
        assert_eq!(input.text(), "task");
        assert_eq!(input.cursor_col(), 2);
    }

    #[test]
    fn cursor_moves_by_grapheme() {
        let mut input = LineInput::new("ne\u{0301}");
        input.left();
        assert_eq!(input.cursor_col(), 1);
        input.delete();
        assert_eq!(input.text(), "n");
        input.right();
        input.home();
        input.insert('a');
        assert_eq!(input.text(), "an");
    }

    #[test]
    fn edits_at_the_edges_are_noops() {
        let mut input = LineInput::new("x");
        input.delete();
        assert_eq!(input.text(), "x");
        input.home();
        input.backspace();
        assert_eq!(input.text(), "x");
        input.end();
        input.right();
        assert_eq!(input.cursor_col(), 1);
    }

    #[test]
    fn wide_characters_move_cursor_two_cells() {
        let mut input = LineInput::new("你");
        assert_eq!(input.cursor_col(), 2);
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor_col(), 0);
    }
}
