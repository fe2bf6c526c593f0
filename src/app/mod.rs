//! Application glue module
//!
//! Configuration and the context that owns consoles and their selections.

mod config;
mod context;

pub use config::{ConsoleConfig, CHAR_PIXEL_H, CHAR_PIXEL_W};
pub use context::{ConsoleContext, ConsoleId, Selection};
