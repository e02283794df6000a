//! Source text buffer
//!
//! Line-based text with a single cursor. Columns count chars, not bytes.

/// Indent unit inserted by Tab
pub const INDENT: &str = "  ";

/// Cursor position (row, column in chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// Editable source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Always holds at least one (possibly empty) line
    lines: Vec<String>,
    cursor: Cursor,
}

impl SourceText {
    /// Buffer holding `text`, cursor at the start
    pub fn new(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            cursor: Cursor::default(),
        }
    }

    /// Full text, lines joined with '\n'
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the whole buffer, cursor back to the start
    pub fn replace(&mut self, text: &str) {
        *self = Self::new(text);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_offset(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let Cursor { row, col } = self.cursor;
        let line = &mut self.lines[row];
        let at = Self::byte_offset(line, col);
        line.insert(at, c);
        self.cursor.col += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    /// Split the current line at the cursor
    pub fn insert_newline(&mut self) {
        let Cursor { row, col } = self.cursor;
        let at = Self::byte_offset(&self.lines[row], col);
        let tail = self.lines[row].split_off(at);
        self.lines.insert(row + 1, tail);
        self.cursor = Cursor { row: row + 1, col: 0 };
    }

    pub fn indent(&mut self) {
        self.insert_str(INDENT);
    }

    /// Delete the char before the cursor, joining lines at column 0
    pub fn backspace(&mut self) {
        let Cursor { row, col } = self.cursor;
        if col > 0 {
            let line = &mut self.lines[row];
            let at = Self::byte_offset(line, col - 1);
            line.remove(at);
            self.cursor.col -= 1;
        } else if row > 0 {
            let current = self.lines.remove(row);
            let prev_len = self.line_len(row - 1);
            self.lines[row - 1].push_str(&current);
            self.cursor = Cursor {
                row: row - 1,
                col: prev_len,
            };
        }
    }

    /// Delete the char under the cursor, joining with the next line at EOL
    pub fn delete(&mut self) {
        let Cursor { row, col } = self.cursor;
        if col < self.line_len(row) {
            let line = &mut self.lines[row];
            let at = Self::byte_offset(line, col);
            line.remove(at);
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.line_len(self.cursor.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.row) {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
        }
    }

    pub fn move_home(&mut self) {
        self.cursor.col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor.col = self.line_len(self.cursor.row);
    }
}

impl Default for SourceText {
    fn default() -> Self {
        Self::new("")
    }
}
