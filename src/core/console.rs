//! The console: scrollback, history, input line and visibility in one unit
//!
//! A console owns every buffer it needs, sized at creation, so nothing it
//! does can run out of memory. Edits arrive as [`EditCommand`]s; a submitted
//! line is recorded in the history, echoed to the scrollback and handed to
//! the submit callback, which may write more output back into the console.

use std::borrow::Cow;
use std::fmt;
use std::time::{Duration, Instant};

use super::command::EditCommand;
use super::history::{BrowseDirection, HistoryRing};
use super::input::InputLineEditor;
use super::output::format_bounded;
use super::scrollback::{RingLines, ScrollbackBuffer};
use super::snapshot::Snapshot;
use super::visibility::Visibility;
use crate::app::ConsoleConfig;
use crate::error::Result;

/// Called with the console and the submitted text.
///
/// Callbacks are `Send` so a console can be built on one thread and handed
/// to another; a single console is still driven from one thread at a time.
pub type SubmitCallback = Box<dyn FnMut(&mut Console, &str) + Send>;

/// Written when a line is submitted and no callback is registered
pub const NO_CALLBACK_MESSAGE: &str = "No enter key callback is registered for this console!\n";

/// What the renderer shows on the input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt<'a> {
    /// The live line being edited
    Editing { text: Cow<'a, str>, cursor: usize },
    /// A history entry being browsed
    Browsing { entry: &'a str },
}

/// An embeddable developer console
pub struct Console {
    scrollback: ScrollbackBuffer,
    history: HistoryRing,
    input: InputLineEditor,
    visibility: Visibility,
    callback: Option<SubmitCallback>,
    slide: Duration,
    output_limit: usize,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("scrollback", &self.scrollback)
            .field("history", &self.history)
            .field("input", &self.input)
            .field("visibility", &self.visibility)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl Console {
    /// Create a console, hidden, with empty buffers sized from `config`
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        config.validate()?;

        let mut console = Self {
            scrollback: ScrollbackBuffer::new(
                config.scrollback_lines,
                config.columns,
                config.rows,
                config.tab_width,
            ),
            history: HistoryRing::new(config.history_entries, config.max_input_length),
            input: InputLineEditor::new(config.max_input_length),
            visibility: Visibility::Hidden,
            callback: None,
            slide: config.slide_duration(),
            output_limit: config.output_buffer_bytes,
        };

        if config.banner {
            console.output("Console initialized\n");
            console.output_fmt(format_args!("Console display lines:\t\t{}\n", config.rows));
            console.output_fmt(format_args!("Console display columns:\t{}\n", config.columns));
            console.output_fmt(format_args!(
                "Console input length:\t\t{}\n",
                config.max_input_length
            ));
        }

        Ok(console)
    }

    pub fn scrollback(&self) -> &ScrollbackBuffer {
        &self.scrollback
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn input(&self) -> &InputLineEditor {
        &self.input
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Append raw text to the scrollback
    pub fn output(&mut self, text: impl AsRef<[u8]>) {
        self.scrollback.append(text);
    }

    /// Append formatted text, cut off at the output buffer ceiling
    pub fn output_fmt(&mut self, args: fmt::Arguments<'_>) {
        let (text, truncated) = format_bounded(args, self.output_limit);
        if truncated {
            tracing::trace!(limit = self.output_limit, "console output truncated");
        }
        self.scrollback.append(text);
    }

    /// Register the submit callback, replacing any previous one
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut Console, &str) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Go back to the default "no callback" behaviour
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Apply one edit command. Returns `Ok(false)` when the console is
    /// hidden and the command was not for it; a rejected keystroke comes
    /// back as the editor's error.
    pub fn handle(&mut self, command: EditCommand, now: Instant) -> Result<bool> {
        if !self.visibility.is_visible() && command != EditCommand::ToggleVisibility {
            return Ok(false);
        }

        if command.yanks_history() {
            self.yank_history();
        }

        match command {
            EditCommand::InsertChar(c) => self.input.insert(c)?,
            EditCommand::DeleteBackward => {
                self.input.delete_backward();
            },
            EditCommand::DeleteForward => {
                self.input.delete_forward();
            },
            EditCommand::MoveCursor(to) => self.input.move_cursor(to),
            EditCommand::ScrollHistory(direction) => {
                self.history.browse(direction);
            },
            EditCommand::ScrollOutput(delta) => self.scrollback.scroll_by(delta),
            EditCommand::Submit => {
                self.submit_input();
            },
            EditCommand::ToggleVisibility => self.visibility.toggle(now, self.slide),
        }
        Ok(true)
    }

    /// Submit the input line: record it, echo it, reset the editor, then
    /// run the callback. Returns the submitted text.
    ///
    /// The callback may write output into this console. While it runs the
    /// console has no callback of its own, so a nested submit gets the
    /// default behaviour.
    pub fn submit_input(&mut self) -> String {
        self.yank_history();
        let text = self.input.submit();
        self.history.record(&text);
        self.scrollback.append(&text);
        self.scrollback.append("\n");
        self.dispatch(&text);
        text
    }

    /// Step through the command history without touching the live line
    pub fn browse_history(&mut self, direction: BrowseDirection) -> Option<&str> {
        self.history.browse(direction)
    }

    /// Seed the history, as though the user had entered `text`
    pub fn add_history(&mut self, text: &str) {
        self.history.record(text);
        self.history.exit_browse();
    }

    /// Overwrite the input line and put the cursor at its end
    pub fn set_input_line(&mut self, text: &str) {
        self.history.exit_browse();
        self.input.yank(text);
    }

    /// Move the output viewport
    pub fn scroll_output(&mut self, delta: isize) {
        self.scrollback.scroll_by(delta);
    }

    /// Show or hide immediately
    pub fn set_visible(&mut self, visible: bool) {
        self.visibility.set(visible);
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Start a slide toward the opposite state
    pub fn toggle_visibility(&mut self, now: Instant) {
        self.visibility.toggle(now, self.slide);
    }

    /// Advance the slide; true when a transition finished
    pub fn tick(&mut self, now: Instant) -> bool {
        self.visibility.tick(now)
    }

    /// Lines for the renderer, top of the viewport first
    pub fn visible_lines(&self, height: usize) -> RingLines<'_> {
        self.scrollback.visible_lines(height)
    }

    /// The input row as the renderer should show it
    pub fn prompt(&self) -> Prompt<'_> {
        match self.history.current_entry() {
            Some(entry) => Prompt::Browsing { entry },
            None => Prompt::Editing {
                text: String::from_utf8_lossy(self.input.as_bytes()),
                cursor: self.input.cursor(),
            },
        }
    }

    /// Capture the full state for inspection or golden tests
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_console(self)
    }

    fn yank_history(&mut self) {
        if let Some(entry) = self.history.current_entry() {
            self.input.yank(entry);
        }
        self.history.exit_browse();
    }

    fn dispatch(&mut self, text: &str) {
        match self.callback.take() {
            Some(mut callback) => {
                callback(self, text);
                // The callback may have installed a replacement for itself
                if self.callback.is_none() {
                    self.callback = Some(callback);
                }
            },
            None => {
                tracing::debug!(command = text, "no submit callback registered");
                self.output(NO_CALLBACK_MESSAGE);
            },
        }
    }
}
