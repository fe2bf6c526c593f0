//! Key Translation Module
//!
//! Maps host key events onto console [`EditCommand`]s. Hosts with their own
//! key handling can skip this and build commands directly; this is the
//! default keymap:
//!
//! - printable ASCII types itself; the toggle key shows/hides the console
//! - Caps Lock inverts the case of letters (the host applies Shift)
//! - Up/Down browse history, Shift+Up/Down scroll the output one line
//! - PageUp/PageDown scroll the output by [`page_size`] lines
//! - Alt and Ctrl combinations are left to the host

use crate::core::{BrowseDirection, CursorMove, EditCommand};

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub caps_lock: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        caps_lock: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        caps_lock: false,
    };

    /// Check if any modifier is pressed (Caps Lock is a lock, not a modifier)
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

/// Keys the console reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A character key as the host's layout produced it with Shift applied;
    /// Caps Lock is applied here from [`Modifiers::caps_lock`]
    Char(char),

    // Cursor keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Backspace,
    Delete,
    Enter,
}

/// Lines scrolled by PageUp/PageDown for a viewport of `rows` lines
pub fn page_size(rows: usize) -> usize {
    (rows / 2).min(5)
}

/// Translate a key press into an edit command.
///
/// `toggle_key` is the character that shows/hides the console and `page`
/// the PageUp/PageDown distance. Returns `None` for keys the console does
/// not handle.
pub fn translate(key: Key, modifiers: Modifiers, toggle_key: char, page: usize) -> Option<EditCommand> {
    if modifiers.alt || modifiers.ctrl {
        return None;
    }

    let key = match key {
        Key::Char(c) if modifiers.caps_lock => Key::Char(invert_case(c)),
        other => other,
    };

    let page = page as isize;
    let command = match key {
        Key::Char(c) if c == toggle_key => EditCommand::ToggleVisibility,
        Key::Char(c) if (' '..='~').contains(&c) => EditCommand::InsertChar(c),
        Key::Char(_) => return None,

        Key::Up if modifiers.shift => EditCommand::ScrollOutput(-1),
        Key::Down if modifiers.shift => EditCommand::ScrollOutput(1),
        Key::Up => EditCommand::ScrollHistory(BrowseDirection::Older),
        Key::Down => EditCommand::ScrollHistory(BrowseDirection::Newer),
        Key::Left => EditCommand::MoveCursor(CursorMove::Left),
        Key::Right => EditCommand::MoveCursor(CursorMove::Right),

        Key::Home => EditCommand::MoveCursor(CursorMove::Home),
        Key::End => EditCommand::MoveCursor(CursorMove::End),
        Key::PageUp => EditCommand::ScrollOutput(-page),
        Key::PageDown => EditCommand::ScrollOutput(page),

        Key::Backspace => EditCommand::DeleteBackward,
        Key::Delete => EditCommand::DeleteForward,
        Key::Enter => EditCommand::Submit,
    };
    Some(command)
}

fn invert_case(c: char) -> char {
    if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else {
        c.to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(key: Key) -> Option<EditCommand> {
        translate(key, Modifiers::NONE, '`', 5)
    }

    #[test]
    fn test_printable_chars() {
        assert_eq!(plain(Key::Char('a')), Some(EditCommand::InsertChar('a')));
        assert_eq!(plain(Key::Char(' ')), Some(EditCommand::InsertChar(' ')));
        assert_eq!(plain(Key::Char('~')), Some(EditCommand::InsertChar('~')));
        assert_eq!(plain(Key::Char('\u{7f}')), None);
        assert_eq!(plain(Key::Char('é')), None);
    }

    #[test]
    fn test_toggle_key() {
        assert_eq!(plain(Key::Char('`')), Some(EditCommand::ToggleVisibility));
        assert_eq!(
            translate(Key::Char('`'), Modifiers::NONE, '~', 5),
            Some(EditCommand::InsertChar('`'))
        );
        assert_eq!(
            translate(Key::Char('~'), Modifiers::NONE, '~', 5),
            Some(EditCommand::ToggleVisibility)
        );
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            plain(Key::Up),
            Some(EditCommand::ScrollHistory(BrowseDirection::Older))
        );
        assert_eq!(
            plain(Key::Down),
            Some(EditCommand::ScrollHistory(BrowseDirection::Newer))
        );
        assert_eq!(
            translate(Key::Up, Modifiers::SHIFT, '`', 5),
            Some(EditCommand::ScrollOutput(-1))
        );
        assert_eq!(
            translate(Key::Down, Modifiers::SHIFT, '`', 5),
            Some(EditCommand::ScrollOutput(1))
        );
        assert_eq!(
            plain(Key::Left),
            Some(EditCommand::MoveCursor(CursorMove::Left))
        );
    }

    #[test]
    fn test_navigation_and_editing_keys() {
        assert_eq!(plain(Key::PageUp), Some(EditCommand::ScrollOutput(-5)));
        assert_eq!(plain(Key::PageDown), Some(EditCommand::ScrollOutput(5)));
        assert_eq!(plain(Key::Home), Some(EditCommand::MoveCursor(CursorMove::Home)));
        assert_eq!(plain(Key::Backspace), Some(EditCommand::DeleteBackward));
        assert_eq!(plain(Key::Delete), Some(EditCommand::DeleteForward));
        assert_eq!(plain(Key::Enter), Some(EditCommand::Submit));
    }

    #[test]
    fn test_alt_and_ctrl_are_rejected() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let alt = Modifiers {
            alt: true,
            ..Modifiers::default()
        };
        assert!(ctrl.any());
        assert_eq!(translate(Key::Char('c'), ctrl, '`', 5), None);
        assert_eq!(translate(Key::Enter, alt, '`', 5), None);
    }

    #[test]
    fn test_caps_lock_inverts_letters() {
        let caps = Modifiers {
            caps_lock: true,
            ..Modifiers::default()
        };
        assert!(!caps.any());
        assert_eq!(
            translate(Key::Char('a'), caps, '`', 5),
            Some(EditCommand::InsertChar('A'))
        );
        // Shift was already applied by the host; Caps Lock flips it back
        assert_eq!(
            translate(Key::Char('A'), caps, '`', 5),
            Some(EditCommand::InsertChar('a'))
        );
        assert_eq!(
            translate(Key::Char('1'), caps, '`', 5),
            Some(EditCommand::InsertChar('1'))
        );
        assert_eq!(
            translate(Key::Char('`'), caps, '`', 5),
            Some(EditCommand::ToggleVisibility)
        );
        assert_eq!(
            translate(Key::Up, caps, '`', 5),
            Some(EditCommand::ScrollHistory(BrowseDirection::Older))
        );
    }

    #[test]
    fn test_page_size() {
        assert_eq!(page_size(25), 5);
        assert_eq!(page_size(6), 3);
        assert_eq!(page_size(1), 0);
    }
}
