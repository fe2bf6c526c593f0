//! Command line editing
//!
//! The input line is a bounded byte buffer with an insertion cursor. Cells
//! are single bytes, so only ASCII characters can be typed; a history entry
//! or host-provided text is copied in byte for byte.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default input capacity in bytes, terminator included
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 256;

/// Cursor movement within the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorMove {
    /// Start of the line
    Home,
    /// End of the line
    End,
    /// One cell left
    Left,
    /// One cell right
    Right,
}

/// Bounded, editable command line
#[derive(Debug, Clone)]
pub struct InputLineEditor {
    buffer: Vec<u8>,
    /// Total cells including the conceptual terminator; at most
    /// `capacity - 1` are usable
    capacity: usize,
    /// Insertion point, `0..=buffer.len()`
    cursor: usize,
}

impl InputLineEditor {
    /// Create an empty line holding at most `capacity - 1` bytes
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current length in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Insertion point
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Current contents as text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    /// Insert `c` at the cursor and move the cursor past it.
    ///
    /// A full line or a multi-byte character is rejected and the line is
    /// left exactly as it was.
    pub fn insert(&mut self, c: char) -> Result<()> {
        if !c.is_ascii() {
            return Err(Error::UnsupportedChar(c));
        }
        if self.buffer.len() >= self.capacity - 1 {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.buffer.insert(self.cursor, c as u8);
        self.cursor += 1;
        Ok(())
    }

    /// Delete the byte before the cursor. Returns false at the start of the
    /// line, where nothing changes.
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.delete_forward()
    }

    /// Delete the byte under the cursor. Returns false at the end of the
    /// line, where nothing changes.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor == self.buffer.len() {
            return false;
        }
        self.buffer.remove(self.cursor);
        true
    }

    /// Move the cursor, clamped to `0..=len`
    pub fn move_cursor(&mut self, to: CursorMove) {
        self.cursor = match to {
            CursorMove::Home => 0,
            CursorMove::End => self.buffer.len(),
            CursorMove::Left => self.cursor.saturating_sub(1),
            CursorMove::Right => (self.cursor + 1).min(self.buffer.len()),
        };
    }

    /// Replace the whole line with `entry` (truncated to fit) and put the
    /// cursor at its end. Used to recall a history entry and to set the line
    /// programmatically.
    pub fn yank(&mut self, entry: &str) {
        let bytes = entry.as_bytes();
        let len = bytes.len().min(self.capacity - 1);
        self.buffer.clear();
        self.buffer.extend_from_slice(&bytes[..len]);
        self.cursor = len;
    }

    /// Take the current contents and reset to an empty line
    pub fn submit(&mut self) -> String {
        let text = self.text();
        self.buffer.clear();
        self.cursor = 0;
        text
    }
}
