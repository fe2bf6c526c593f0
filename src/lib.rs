//! Embeddable Developer Console
//!
//! An in-game style drop-down console: a scrollback of printed output, a
//! single editable input line with command history, and a slide-in/slide-out
//! visibility toggle. The host supplies key events and an enter-key callback;
//! the console never draws anything itself.
//!
//! - `core`: scrollback ring, history ring, input editor, the `Console` aggregate
//! - `app`: configuration and the multi-console `ConsoleContext`
//! - `input`: default keymap from host keys to edit commands

pub mod app;
pub mod core;
mod error;
pub mod input;

pub use crate::app::{ConsoleConfig, ConsoleContext, ConsoleId, Selection};
pub use crate::core::{BrowseDirection, Console, CursorMove, EditCommand, Snapshot};
pub use error::{Error, Result};
