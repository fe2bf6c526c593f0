//! Deterministic snapshot generation
//!
//! Snapshots capture the complete console state in a serializable format
//! for testing and debugging. Given the same sequence of output and edit
//! commands, a console must produce identical snapshots.

use serde::{Deserialize, Serialize};

use super::console::Console;
use crate::error::Result;

/// A complete snapshot of a console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Scrollback geometry
    pub columns: usize,
    pub rows: usize,
    pub capacity: usize,
    /// Ring positions
    pub write_index: usize,
    pub scroll_index: usize,
    #[serde(default, skip_serializing_if = "is_false")]
    pub pending_newline: bool,
    /// Every ring slot, oldest first
    pub lines: Vec<String>,
    /// The viewport, `rows` lines from the scroll position
    pub visible: Vec<String>,
    /// Live input line
    pub input: InputSnapshot,
    /// Recorded history, oldest first
    pub history: Vec<String>,
    /// Entry being browsed, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browsing: Option<String>,
    /// hidden / visible / showing / hiding
    pub visibility: String,
}

/// Snapshot of the input line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub text: String,
    pub cursor: usize,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Snapshot {
    /// Create a snapshot from the current console state
    pub fn from_console(console: &Console) -> Self {
        let scrollback = console.scrollback();
        let history = console.history();

        Self {
            columns: scrollback.line_width(),
            rows: scrollback.rows(),
            capacity: scrollback.capacity(),
            write_index: scrollback.write_index(),
            scroll_index: scrollback.scroll_index(),
            pending_newline: scrollback.pending_newline(),
            lines: scrollback.iter().map(|l| l.text().into_owned()).collect(),
            visible: scrollback
                .visible_lines(scrollback.rows())
                .map(|l| l.text().into_owned())
                .collect(),
            input: InputSnapshot {
                text: console.input().text(),
                cursor: console.input().cursor(),
            },
            history: history.iter().map(str::to_string).collect(),
            browsing: history.current_entry().map(str::to_string),
            visibility: console.visibility().label().to_string(),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable rendering: the viewport, then the input row
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Console ({}x{}, {} lines, {})\n",
            self.columns, self.rows, self.capacity, self.visibility
        ));
        out.push_str("---\n");
        for line in &self.visible {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("---\n");
        match &self.browsing {
            Some(entry) => out.push_str(&format!("history> {}\n", entry)),
            None => out.push_str(&format!("> {}\n", self.input.text)),
        }
        out.push_str(&format!("Cursor: {}\n", self.input.cursor));
        out.push_str(&format!("History: {}\n", self.history.len()));
        out
    }
}
