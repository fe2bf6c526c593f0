//! Edit commands
//!
//! The host translates its raw key events into this closed set of commands
//! and delivers each to the console holding input focus.

use serde::{Deserialize, Serialize};

use super::history::BrowseDirection;
use super::input::CursorMove;

/// A single edit command for a console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditCommand {
    /// Type a character at the cursor
    InsertChar(char),
    /// Backspace
    DeleteBackward,
    /// Delete the character under the cursor
    DeleteForward,
    /// Move the input cursor
    MoveCursor(CursorMove),
    /// Browse the command history
    ScrollHistory(BrowseDirection),
    /// Scroll the output viewport by a signed line count
    ScrollOutput(isize),
    /// Submit the input line
    Submit,
    /// Show or hide the console
    ToggleVisibility,
}

impl EditCommand {
    /// Commands that edit the line turn a browsed history entry into the
    /// live line before they run.
    pub fn yanks_history(&self) -> bool {
        matches!(
            self,
            EditCommand::InsertChar(_)
                | EditCommand::DeleteBackward
                | EditCommand::DeleteForward
                | EditCommand::MoveCursor(_)
                | EditCommand::Submit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yanks_history() {
        assert!(EditCommand::InsertChar('a').yanks_history());
        assert!(EditCommand::MoveCursor(CursorMove::Home).yanks_history());
        assert!(EditCommand::Submit.yanks_history());
        assert!(!EditCommand::ScrollHistory(BrowseDirection::Older).yanks_history());
        assert!(!EditCommand::ScrollOutput(-5).yanks_history());
        assert!(!EditCommand::ToggleVisibility.yanks_history());
    }
}
