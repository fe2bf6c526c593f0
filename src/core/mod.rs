//! Console Core Module
//!
//! Platform-independent console state. This module contains:
//! - Scrollback ring with line wrapping and tab expansion
//! - Command history ring with browse/recall
//! - Input line editor
//! - Visibility state machine
//! - The `Console` aggregate and its edit commands
//! - Deterministic snapshot generation
//!
//! The core is deterministic: given the same sequence of output and edit
//! commands, it always produces the same state.

mod command;
mod console;
mod history;
mod input;
mod line;
mod output;
mod scrollback;
mod snapshot;
mod visibility;

pub use command::EditCommand;
pub use console::{Console, Prompt, SubmitCallback, NO_CALLBACK_MESSAGE};
pub use history::{BrowseDirection, HistoryRing, DEFAULT_HISTORY_ENTRIES};
pub use input::{CursorMove, InputLineEditor, DEFAULT_MAX_INPUT_LENGTH};
pub use line::Line;
pub use output::{format_bounded, DEFAULT_OUTPUT_BUFFER};
pub use scrollback::{RingLines, ScrollbackBuffer, DEFAULT_CAPACITY, DEFAULT_TAB_WIDTH};
pub use snapshot::{InputSnapshot, Snapshot};
pub use visibility::{Target, Visibility, DEFAULT_SLIDE};
