//! Application context owning every console
//!
//! Consoles live in an arena and are addressed by [`ConsoleId`] handles. A
//! handle carries the generation of its slot, so a handle to a destroyed
//! console is detected instead of reaching whatever reuses the slot.
//!
//! The context tracks two selections: the console receiving end-user input
//! (focus) and the console targeted by programmatic configuration calls
//! (edit). The first console created fills both.

use std::fmt;
use std::time::Instant;

use super::config::ConsoleConfig;
use crate::core::{Console, EditCommand};
use crate::error::{Error, Result};

/// Handle to a console in a [`ConsoleContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsoleId {
    index: usize,
    generation: u32,
}

impl fmt::Display for ConsoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "console #{} (generation {})", self.index, self.generation)
    }
}

/// The two console selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Receives end-user keyboard input
    Focus,
    /// Target of programmatic configuration
    Edit,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Focus => write!(f, "end-user input"),
            Selection::Edit => write!(f, "programmatic configuration"),
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    console: Option<Console>,
}

/// Owner of a set of consoles and of the focus/edit selections
#[derive(Debug)]
pub struct ConsoleContext {
    slots: Vec<Slot>,
    focus: Option<ConsoleId>,
    edit: Option<ConsoleId>,
    config: ConsoleConfig,
}

impl Default for ConsoleContext {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl ConsoleContext {
    /// Create an empty context; `config` is used by [`ConsoleContext::create`]
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            slots: Vec::new(),
            focus: None,
            edit: None,
            config,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Create a console with the context's configuration
    pub fn create(&mut self) -> Result<ConsoleId> {
        let config = self.config.clone();
        self.create_with(&config)
    }

    /// Create a console with its own configuration
    pub fn create_with(&mut self, config: &ConsoleConfig) -> Result<ConsoleId> {
        let console = Console::new(config)?;

        let id = match self.slots.iter().position(|slot| slot.console.is_none()) {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.console = Some(console);
                ConsoleId {
                    index,
                    generation: slot.generation,
                }
            },
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    console: Some(console),
                });
                ConsoleId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            },
        };

        if self.focus.is_none() {
            self.focus = Some(id);
        }
        if self.edit.is_none() {
            self.edit = Some(id);
        }
        tracing::debug!(%id, "console created");
        Ok(id)
    }

    /// Destroy a console. Destroying a selected console clears that
    /// selection with a warning.
    pub fn destroy(&mut self, id: ConsoleId) -> Result<()> {
        self.release(id)?;

        if self.edit == Some(id) {
            tracing::warn!(%id, "destroyed the console selected for programmatic configuration");
            self.edit = None;
        }
        if self.focus == Some(id) {
            tracing::warn!(%id, "destroyed the console receiving end-user input");
            self.focus = None;
        }
        tracing::debug!(%id, "console destroyed");
        Ok(())
    }

    /// Destroy every console and clear both selections, without warnings
    pub fn quit(&mut self) {
        for slot in &mut self.slots {
            if slot.console.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.focus = None;
        self.edit = None;
        tracing::debug!("all consoles destroyed");
    }

    /// Number of live consoles
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.console.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handles of every live console
    pub fn ids(&self) -> impl Iterator<Item = ConsoleId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.console.as_ref().map(|_| ConsoleId {
                index,
                generation: slot.generation,
            })
        })
    }

    pub fn contains(&self, id: ConsoleId) -> bool {
        self.get(id).is_ok()
    }

    pub fn get(&self, id: ConsoleId) -> Result<&Console> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.console.as_ref())
            .ok_or(Error::InvalidConsoleHandle(id))
    }

    pub fn get_mut(&mut self, id: ConsoleId) -> Result<&mut Console> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.console.as_mut())
            .ok_or(Error::InvalidConsoleHandle(id))
    }

    /// Select the console that receives end-user input
    pub fn focus(&mut self, id: ConsoleId) -> Result<()> {
        self.get(id)?;
        tracing::debug!(%id, "input focus changed");
        self.focus = Some(id);
        Ok(())
    }

    /// Select the console targeted by programmatic configuration
    pub fn edit(&mut self, id: ConsoleId) -> Result<()> {
        self.get(id)?;
        tracing::debug!(%id, "edit target changed");
        self.edit = Some(id);
        Ok(())
    }

    pub fn focused(&self) -> Option<ConsoleId> {
        self.focus
    }

    pub fn edited(&self) -> Option<ConsoleId> {
        self.edit
    }

    /// The console receiving end-user input
    pub fn focused_mut(&mut self) -> Result<&mut Console> {
        let id = self.focus.ok_or(Error::NoConsoleSelected(Selection::Focus))?;
        self.get_mut(id)
    }

    /// The console targeted by programmatic configuration
    pub fn edited_mut(&mut self) -> Result<&mut Console> {
        let id = self.edit.ok_or(Error::NoConsoleSelected(Selection::Edit))?;
        self.get_mut(id)
    }

    /// Deliver an edit command to the focused console
    pub fn handle_input(&mut self, command: EditCommand, now: Instant) -> Result<bool> {
        self.focused_mut()?.handle(command, now)
    }

    /// Print to the focused console
    pub fn print(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        self.focused_mut()?.output(text);
        Ok(())
    }

    /// Formatted print to the focused console
    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.focused_mut()?.output_fmt(args);
        Ok(())
    }

    /// Show or hide the edit console immediately
    pub fn set_visibility(&mut self, visible: bool) -> Result<()> {
        self.edited_mut()?.set_visible(visible);
        Ok(())
    }

    /// Whether the edit console is shown (or sliding in)
    pub fn visibility(&self) -> Result<bool> {
        let id = self.edit.ok_or(Error::NoConsoleSelected(Selection::Edit))?;
        Ok(self.get(id)?.is_visible())
    }

    /// Overwrite the edit console's input line
    pub fn set_input_line(&mut self, text: &str) -> Result<()> {
        self.edited_mut()?.set_input_line(text);
        Ok(())
    }

    /// Seed the edit console's command history
    pub fn add_history(&mut self, text: &str) -> Result<()> {
        self.edited_mut()?.add_history(text);
        Ok(())
    }

    /// Register the edit console's submit callback
    pub fn set_callback<F>(&mut self, callback: F) -> Result<()>
    where
        F: FnMut(&mut Console, &str) + Send + 'static,
    {
        self.edited_mut()?.set_callback(callback);
        Ok(())
    }

    /// Advance visibility transitions on every console
    pub fn tick(&mut self, now: Instant) {
        for console in self.slots.iter_mut().filter_map(|slot| slot.console.as_mut()) {
            console.tick(now);
        }
    }

    fn release(&mut self, id: ConsoleId) -> Result<Console> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .ok_or(Error::InvalidConsoleHandle(id))?;
        let console = slot.console.take().ok_or(Error::InvalidConsoleHandle(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        Ok(console)
    }
}
