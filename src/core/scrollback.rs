//! Scrollback buffer implementation
//!
//! The scrollback buffer is a fixed ring of fixed-width lines. Output is
//! appended a byte at a time: long lines wrap onto the next ring slot, tabs
//! expand to the next tab stop, and newlines are deferred until the next
//! character arrives so that no blank line appears between the last output
//! line and the input row below it.
//!
//! Two indices walk the ring together: `write_index` is the line receiving
//! output and `scroll_index` is the top line of the viewport. Every line
//! advance moves both, keeping the viewport pinned to the newest output
//! until the host scrolls it with [`ScrollbackBuffer::scroll_by`].

use super::line::Line;

/// Default number of stored lines
pub const DEFAULT_CAPACITY: usize = 100;

/// Default tab stop
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Ring buffer of fixed-width output lines
#[derive(Debug, Clone)]
pub struct ScrollbackBuffer {
    /// Ring storage, addressed modulo `lines.len()`
    lines: Vec<Line>,
    /// Maximum cells per line
    line_width: usize,
    /// Viewport height the scroll position was anchored for
    rows: usize,
    /// Tab stop interval
    tab_width: usize,
    /// Line currently being appended to
    write_index: usize,
    /// Oldest line visible at the top of the viewport
    scroll_index: usize,
    /// Column where the next byte lands
    write_cursor: usize,
    /// A newline was consumed; the line advance happens on the next byte.
    /// Not derivable from the stored lines.
    pending_newline: bool,
}

impl ScrollbackBuffer {
    /// Create a scrollback ring.
    ///
    /// `rows` is the viewport height: the initial scroll position is chosen
    /// so that the `rows` lines ending at the write line are visible.
    /// Degenerate geometry is clamped (at least one line, two columns, one
    /// row and a tab stop of one).
    pub fn new(capacity: usize, line_width: usize, rows: usize, tab_width: usize) -> Self {
        let capacity = capacity.max(1);
        let line_width = line_width.max(2);
        let rows = rows.clamp(1, capacity);

        Self {
            lines: (0..capacity).map(|_| Line::new(line_width)).collect(),
            line_width,
            rows,
            tab_width: tab_width.max(1),
            write_index: 0,
            scroll_index: (capacity + 1 - rows) % capacity,
            write_cursor: 0,
            pending_newline: false,
        }
    }

    /// Number of lines in the ring
    pub fn capacity(&self) -> usize {
        self.lines.len()
    }

    /// Maximum cells per line
    pub fn line_width(&self) -> usize {
        self.line_width
    }

    /// Viewport height used to anchor the scroll position
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Tab stop interval
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Ring index of the line receiving output
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Ring index of the top visible line
    pub fn scroll_index(&self) -> usize {
        self.scroll_index
    }

    /// Column where the next byte will be written
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Whether a line advance is waiting for the next byte
    pub fn pending_newline(&self) -> bool {
        self.pending_newline
    }

    /// Get a line by ring index
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// The line receiving output. After `"text\n"` this is the line holding
    /// `text`, since the advance is still pending.
    pub fn current_line(&self) -> &Line {
        &self.lines[self.write_index]
    }

    /// Append text, interpreting `\n` and `\t`.
    ///
    /// Never fails and never allocates beyond the fixed ring; the work is
    /// linear in the length of `text`.
    pub fn append(&mut self, text: impl AsRef<[u8]>) {
        for &byte in text.as_ref() {
            if byte == b'\n' {
                // A second newline before any text still owes the first advance
                if self.pending_newline {
                    self.advance_line();
                }
                self.pending_newline = true;
                continue;
            }

            if self.pending_newline || self.write_cursor >= self.last_column() {
                self.advance_line();
            }

            if byte == b'\t' {
                self.expand_tab();
                continue;
            }

            self.lines[self.write_index].push(byte);
            self.write_cursor += 1;
        }
    }

    /// Move the viewport by `delta` lines (negative scrolls toward older
    /// output). Wraps in both directions; the write position is untouched.
    pub fn scroll_by(&mut self, delta: isize) {
        let capacity = self.capacity() as isize;
        let delta = delta.rem_euclid(capacity);
        self.scroll_index = ((self.scroll_index as isize + delta) % capacity) as usize;
    }

    /// `height` consecutive lines starting at the top of the viewport.
    ///
    /// The iterator borrows the buffer read-only and can be cloned to walk
    /// the same window again.
    pub fn visible_lines(&self, height: usize) -> RingLines<'_> {
        RingLines {
            lines: &self.lines,
            next: self.scroll_index,
            remaining: height,
        }
    }

    /// Every ring slot from oldest to newest, ending with the write line
    pub fn iter(&self) -> RingLines<'_> {
        RingLines {
            lines: &self.lines,
            next: (self.write_index + 1) % self.capacity(),
            remaining: self.capacity(),
        }
    }

    fn last_column(&self) -> usize {
        self.line_width - 1
    }

    fn advance_line(&mut self) {
        let capacity = self.capacity();
        self.write_index = (self.write_index + 1) % capacity;
        self.scroll_index = (self.scroll_index + 1) % capacity;
        self.lines[self.write_index].clear();
        self.write_cursor = 0;
        self.pending_newline = false;
    }

    fn expand_tab(&mut self) {
        let col = self.write_cursor;
        if self.line_width - col <= self.tab_width {
            // No room for a full stop before the margin: continue on the next line
            self.pending_newline = true;
            return;
        }

        let count = self.tab_width - col % self.tab_width;
        self.lines[self.write_index].pad(count);
        self.write_cursor += count;
    }
}

/// Iterator over a run of ring slots, wrapping at the end of the ring
#[derive(Debug, Clone)]
pub struct RingLines<'a> {
    lines: &'a [Line],
    next: usize,
    remaining: usize,
}

impl<'a> Iterator for RingLines<'a> {
    type Item = &'a Line;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let line = &self.lines[self.next];
        self.next = (self.next + 1) % self.lines.len();
        self.remaining -= 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for RingLines<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: RingLines<'_>) -> Vec<String> {
        lines.map(|l| l.text().into_owned()).collect()
    }

    #[test]
    fn test_scrollback_new() {
        let sb = ScrollbackBuffer::new(100, 80, 25, 8);
        assert_eq!(sb.capacity(), 100);
        assert_eq!(sb.line_width(), 80);
        assert_eq!(sb.write_index(), 0);
        assert_eq!(sb.scroll_index(), 76);
        assert!(sb.iter().all(|l| l.is_empty()));
    }

    #[test]
    fn test_append_plain_text() {
        let mut sb = ScrollbackBuffer::new(5, 20, 5, 8);
        sb.append("hello");
        assert_eq!(sb.current_line().text(), "hello");
        assert_eq!(sb.write_cursor(), 5);
        assert!(!sb.pending_newline());
        assert!(sb.line(1).unwrap().is_empty());
    }

    #[test]
    fn test_ring_keeps_newest_lines() {
        let mut sb = ScrollbackBuffer::new(3, 10, 3, 8);
        for s in ["a\n", "b\n", "c\n", "d\n"] {
            sb.append(s);
        }
        assert_eq!(texts(sb.visible_lines(3)), vec!["b", "c", "d"]);
        assert_eq!(texts(sb.iter()), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_newline_is_deferred() {
        let mut sb = ScrollbackBuffer::new(5, 20, 5, 8);
        sb.append("one\n");
        assert!(sb.pending_newline());
        assert_eq!(sb.write_index(), 0);

        sb.append("two");
        assert_eq!(sb.write_index(), 1);
        assert_eq!(sb.line(0).unwrap().text(), "one");
        assert_eq!(sb.line(1).unwrap().text(), "two");
    }

    #[test]
    fn test_double_newline_keeps_blank_line() {
        let mut sb = ScrollbackBuffer::new(5, 20, 5, 8);
        sb.append("a\n\nb");
        assert_eq!(sb.write_index(), 2);
        assert!(sb.line(1).unwrap().is_empty());
        assert_eq!(sb.current_line().text(), "b");
    }

    #[test]
    fn test_long_text_wraps() {
        let mut sb = ScrollbackBuffer::new(5, 5, 5, 8);
        sb.append("abcdefg");
        assert_eq!(sb.line(0).unwrap().text(), "abcd");
        assert_eq!(sb.line(1).unwrap().text(), "efg");
        assert_eq!(sb.write_index(), 1);
    }

    #[test]
    fn test_newline_after_full_line_advances_once() {
        let mut sb = ScrollbackBuffer::new(5, 5, 5, 8);
        sb.append("abcd\nx");
        assert_eq!(sb.write_index(), 1);
        assert_eq!(sb.current_line().text(), "x");
    }

    #[test]
    fn test_tab_expands_to_next_stop() {
        let mut sb = ScrollbackBuffer::new(5, 20, 5, 8);
        sb.append("ab\tc");
        assert_eq!(sb.current_line().text(), "ab      c");
        assert_eq!(sb.write_cursor(), 9);

        let mut sb = ScrollbackBuffer::new(5, 20, 5, 8);
        sb.append("\t");
        assert_eq!(sb.write_cursor(), 8);
    }

    #[test]
    fn test_tab_near_margin_advances_line() {
        let mut sb = ScrollbackBuffer::new(5, 20, 5, 8);
        sb.append("abcdefghijkl\tz");
        assert_eq!(sb.line(0).unwrap().text(), "abcdefghijkl");
        assert_eq!(sb.current_line().text(), "z");

        let mut sb = ScrollbackBuffer::new(5, 20, 5, 8);
        sb.append("abcdefghijk\t");
        assert_eq!(sb.write_cursor(), 16);
        assert_eq!(sb.write_index(), 0);
    }

    #[test]
    fn test_scroll_index_tracks_writes() {
        let mut sb = ScrollbackBuffer::new(10, 20, 4, 8);
        assert_eq!(sb.scroll_index(), 7);
        sb.append("1\n2\n3\n4");
        assert_eq!(sb.write_index(), 3);
        assert_eq!(sb.scroll_index(), 0);
        assert_eq!(texts(sb.visible_lines(4)), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_scroll_by_wraps_both_ways() {
        let mut sb = ScrollbackBuffer::new(10, 20, 10, 8);
        assert_eq!(sb.scroll_index(), 1);
        sb.scroll_by(-1);
        assert_eq!(sb.scroll_index(), 0);
        sb.scroll_by(-1);
        assert_eq!(sb.scroll_index(), 9);
        sb.scroll_by(3);
        assert_eq!(sb.scroll_index(), 2);
        sb.scroll_by(-25);
        assert_eq!(sb.scroll_index(), 7);
        assert_eq!(sb.write_index(), 0);
    }

    #[test]
    fn test_visible_lines_restartable() {
        let mut sb = ScrollbackBuffer::new(4, 10, 2, 8);
        sb.append("x\ny");
        let window = sb.visible_lines(2);
        assert_eq!(window.len(), 2);
        let first = texts(window.clone());
        let second = texts(window);
        assert_eq!(first, second);
        assert_eq!(first, vec!["x", "y"]);
    }

    #[test]
    fn test_visible_lines_taller_than_ring_wraps() {
        let mut sb = ScrollbackBuffer::new(2, 10, 2, 8);
        sb.append("p\nq");
        assert_eq!(texts(sb.visible_lines(4)), vec!["p", "q", "p", "q"]);
    }

    #[test]
    fn test_degenerate_geometry_is_clamped() {
        let mut sb = ScrollbackBuffer::new(0, 0, 0, 0);
        assert_eq!(sb.capacity(), 1);
        assert_eq!(sb.line_width(), 2);
        sb.append("abc");
        assert_eq!(sb.current_line().text(), "c");
    }
}
