//! Single-line query buffer with a byte cursor.
//!
//! The cursor is a byte offset into UTF-8 text. Cursor stops are rune
//! boundaries: a byte whose top two bits are `10` is a continuation byte and
//! is never a valid stop. Every mutation is bounded by `MAX_QUERY_BYTES`; an
//! edit that would overflow the buffer is refused (the caller sees `false`)
//! and leaves the buffer untouched.

pub mod width;

pub use width::egc_width;

/// Maximum query length in bytes (an 8 KiB buffer minus its terminator).
pub const MAX_QUERY_BYTES: usize = 8191;

#[inline]
fn is_continuation(b: u8) -> bool {
    (b & 0xc0) == 0x80
}

/// Editable query text plus cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuffer {
    text: String,
    cursor: usize,
}

impl QueryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position as a byte offset (always a rune boundary).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn at_end(&self) -> bool {
        self.cursor == self.text.len()
    }

    /// Byte offset of the neighbouring rune stop in direction `forward`.
    ///
    /// Returns `None` when the cursor already sits at that edge.
    pub fn next_rune(&self, forward: bool) -> Option<usize> {
        let bytes = self.text.as_bytes();
        if forward {
            if self.cursor >= bytes.len() {
                return None;
            }
            let mut n = self.cursor + 1;
            while n < bytes.len() && is_continuation(bytes[n]) {
                n += 1;
            }
            Some(n)
        } else {
            if self.cursor == 0 {
                return None;
            }
            let mut n = self.cursor - 1;
            while n > 0 && is_continuation(bytes[n]) {
                n -= 1;
            }
            Some(n)
        }
    }

    /// Insert `s` at the cursor and advance past it. Refused if the result
    /// would exceed `MAX_QUERY_BYTES`.
    pub fn insert(&mut self, s: &str) -> bool {
        if self.text.len() + s.len() > MAX_QUERY_BYTES {
            return false;
        }
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        true
    }

    /// Remove `count` bytes immediately before the cursor. `count` is
    /// clamped to the cursor; the caller is responsible for landing on a rune
    /// boundary (use `next_rune`).
    pub fn delete_back(&mut self, count: usize) -> bool {
        let count = count.min(self.cursor);
        let start = self.cursor - count;
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    pub fn move_left(&mut self) -> bool {
        match self.next_rune(false) {
            Some(n) => {
                self.cursor = n;
                true
            }
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match self.next_rune(true) {
            Some(n) => {
                self.cursor = n;
                true
            }
            None => false,
        }
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Backspace: remove the rune before the cursor.
    pub fn delete_rune_before(&mut self) -> bool {
        match self.next_rune(false) {
            Some(n) => self.delete_back(self.cursor - n),
            None => false,
        }
    }

    /// Delete: remove the rune under the cursor.
    pub fn delete_rune_at(&mut self) -> bool {
        match self.next_rune(true) {
            Some(n) => {
                self.cursor = n;
                self.delete_rune_before()
            }
            None => false,
        }
    }

    /// Delete the previous word in two phases: first the run of spaces
    /// directly left of the cursor, then the non-space run before it.
    /// Returns `true` if anything was removed.
    pub fn delete_word_back(&mut self) -> bool {
        let start = self.cursor;
        while self.prev_byte().is_some_and(|b| b == b' ') {
            self.delete_rune_before();
        }
        while self.prev_byte().is_some_and(|b| b != b' ') {
            self.delete_rune_before();
        }
        self.cursor != start
    }

    // First byte of the rune left of the cursor.
    fn prev_byte(&self) -> Option<u8> {
        self.next_rune(false).map(|n| self.text.as_bytes()[n])
    }

    /// Remove everything left of the cursor.
    pub fn delete_to_start(&mut self) -> bool {
        self.delete_back(self.cursor)
    }

    /// Remove everything from the cursor to the end.
    pub fn truncate_at_cursor(&mut self) -> bool {
        self.text.truncate(self.cursor);
        true
    }

    /// Replace the whole buffer, truncating at the capacity on a rune
    /// boundary. Cursor moves to the end.
    pub fn replace(&mut self, s: &str) {
        let mut end = s.len().min(MAX_QUERY_BYTES);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.text.clear();
        self.text.push_str(&s[..end]);
        self.cursor = self.text.len();
    }
}

/// Grapheme helpers used when laying out text in terminal cells.
pub mod grapheme {
    use crate::egc_width;
    use unicode_segmentation::UnicodeSegmentation;

    /// Total width in terminal cells.
    pub fn str_width(s: &str) -> usize {
        s.graphemes(true).map(|g| egc_width(g) as usize).sum()
    }

    /// Longest prefix of `s` that fits in `max_cols` cells, never splitting a
    /// grapheme cluster. Returns the prefix and its width.
    pub fn truncate_to_width(s: &str, max_cols: usize) -> (&str, usize) {
        let mut col = 0;
        for (idx, g) in s.grapheme_indices(true) {
            let w = egc_width(g) as usize;
            if col + w > max_cols {
                return (&s[..idx], col);
            }
            col += w;
        }
        (s, col)
    }
}
