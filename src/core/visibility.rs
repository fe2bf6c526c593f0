//! Console visibility state
//!
//! A console is hidden, visible, or sliding toward one of those states. The
//! slide has a deadline; the host's frame loop calls [`Visibility::tick`]
//! and the transition completes once the deadline has passed. How the slide
//! is drawn is up to the renderer.

use std::time::{Duration, Instant};

/// Default slide duration
pub const DEFAULT_SLIDE: Duration = Duration::from_millis(230);

/// End state of a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Hidden,
    Visible,
}

/// Visibility state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Fully hidden; consoles start here
    #[default]
    Hidden,
    /// Fully shown
    Visible,
    /// Sliding toward `target`, done at `deadline`
    Transitioning { target: Target, deadline: Instant },
}

impl Visibility {
    /// Reverse direction: start sliding toward the opposite of the current
    /// target, finishing `slide` after `now`.
    pub fn toggle(&mut self, now: Instant, slide: Duration) {
        let target = if self.is_visible() {
            Target::Hidden
        } else {
            Target::Visible
        };
        *self = Visibility::Transitioning {
            target,
            deadline: now + slide,
        };
    }

    /// Finish a transition whose deadline has passed. Returns true when the
    /// state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match *self {
            Visibility::Transitioning { target, deadline } if now >= deadline => {
                *self = match target {
                    Target::Hidden => Visibility::Hidden,
                    Target::Visible => Visibility::Visible,
                };
                true
            },
            _ => false,
        }
    }

    /// Show or hide immediately, cancelling any slide
    pub fn set(&mut self, visible: bool) {
        *self = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    /// Whether the console is shown or on its way to being shown
    pub fn is_visible(&self) -> bool {
        matches!(
            self,
            Visibility::Visible
                | Visibility::Transitioning {
                    target: Target::Visible,
                    ..
                }
        )
    }

    /// Whether anything should be drawn (every state but fully hidden)
    pub fn is_drawn(&self) -> bool {
        !matches!(self, Visibility::Hidden)
    }

    /// Deadline of the running transition
    pub fn deadline(&self) -> Option<Instant> {
        match self {
            Visibility::Transitioning { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    /// Short label used in snapshots
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Hidden => "hidden",
            Visibility::Visible => "visible",
            Visibility::Transitioning {
                target: Target::Visible,
                ..
            } => "showing",
            Visibility::Transitioning {
                target: Target::Hidden,
                ..
            } => "hiding",
        }
    }
}
