//! Scrollback line representation
//!
//! A line is one fixed-width row of single-byte cells. Only the cells that
//! have been written are stored; the length of the byte vector plays the
//! role of the terminator in a fixed-size cell array.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A row of single-byte cells in the scrollback ring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Written cells, left to right
    cells: Vec<u8>,
}

impl Line {
    /// Create an empty line with room for `width` cells
    pub fn new(width: usize) -> Self {
        Self {
            cells: Vec::with_capacity(width),
        }
    }

    /// Number of written cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if nothing has been written to this line
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cell contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Text content of the line.
    ///
    /// Bytes that are not valid UTF-8 (for example half of a multi-byte
    /// character split by a wrap) are shown as U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.cells)
    }

    /// Write a cell at the end of the line
    pub(crate) fn push(&mut self, byte: u8) {
        self.cells.push(byte);
    }

    /// Write `count` blank cells
    pub(crate) fn pad(&mut self, count: usize) {
        self.cells.extend(std::iter::repeat(b' ').take(count));
    }

    /// Forget the previous contents, keeping the allocation
    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }
}
