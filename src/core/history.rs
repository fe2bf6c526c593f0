//! Command history ring
//!
//! Submitted input lines are remembered in a fixed ring. The user can browse
//! the ring (older/newer) without disturbing the line being edited; the
//! console copies the browsed entry into the editor ("yank") as soon as the
//! user edits it.

use serde::{Deserialize, Serialize};

use super::output::truncate;

/// Default number of remembered entries
pub const DEFAULT_HISTORY_ENTRIES: usize = 25;

/// Direction of a history browse step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowseDirection {
    /// Toward earlier submissions
    Older,
    /// Toward the live edit line
    Newer,
}

/// Fixed ring of past input lines
#[derive(Debug, Clone)]
pub struct HistoryRing {
    entries: Vec<String>,
    /// Longest stored entry in bytes, terminator included
    max_len: usize,
    /// Slot of the most recently recorded entry
    write_index: usize,
    /// Slot being previewed; `None` while editing the live line
    scroll_index: Option<usize>,
    /// Entries recorded so far, saturating at capacity
    recorded: usize,
}

impl HistoryRing {
    /// Create a ring of `capacity` entries, each at most `max_len - 1` bytes
    pub fn new(capacity: usize, max_len: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: vec![String::new(); capacity],
            max_len: max_len.max(1),
            write_index: 0,
            scroll_index: None,
            recorded: 0,
        }
    }

    /// Number of slots in the ring
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of recorded entries (never more than the capacity)
    pub fn len(&self) -> usize {
        self.recorded
    }

    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    /// Slot of the most recently recorded entry
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Slot currently being browsed
    pub fn scroll_index(&self) -> Option<usize> {
        self.scroll_index
    }

    pub fn is_browsing(&self) -> bool {
        self.scroll_index.is_some()
    }

    /// Store `text` as the newest entry, overwriting the oldest slot once
    /// the ring is full.
    ///
    /// The browse position is left alone; callers treat any active browse
    /// as finished.
    pub fn record(&mut self, text: &str) {
        self.write_index = (self.write_index + 1) % self.capacity();
        let slot = &mut self.entries[self.write_index];
        slot.clear();
        slot.push_str(truncate(text, self.max_len - 1));
        self.recorded = (self.recorded + 1).min(self.capacity());
    }

    /// Take one browse step and return the entry now shown, if any.
    ///
    /// Stepping older from the live line starts at the newest entry; stepping
    /// newer past the newest entry returns to the live line.
    pub fn browse(&mut self, direction: BrowseDirection) -> Option<&str> {
        let capacity = self.capacity();
        self.scroll_index = match (self.scroll_index, direction) {
            (None, BrowseDirection::Older) => Some(self.write_index),
            (None, BrowseDirection::Newer) => None,
            (Some(index), BrowseDirection::Older) => Some((index + capacity - 1) % capacity),
            (Some(index), BrowseDirection::Newer) => {
                let next = (index + 1) % capacity;
                if next == (self.write_index + 1) % capacity {
                    None
                } else {
                    Some(next)
                }
            },
        };
        self.current_entry()
    }

    /// The entry under the browse position
    pub fn current_entry(&self) -> Option<&str> {
        self.scroll_index.map(|index| self.entries[index].as_str())
    }

    /// Leave browsing mode and return to the live line
    pub fn exit_browse(&mut self) {
        self.scroll_index = None;
    }

    /// Recorded entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let capacity = self.capacity();
        let start = (self.write_index + capacity + 1 - self.recorded) % capacity;
        (0..self.recorded).map(move |i| self.entries[(start + i) % capacity].as_str())
    }
}
