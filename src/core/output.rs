//! Bounded formatting for console output
//!
//! Formatted output is rendered into a buffer with a fixed ceiling before it
//! reaches the scrollback. Anything past the ceiling is dropped.

use std::fmt::{self, Write};

/// Default formatting ceiling in bytes
pub const DEFAULT_OUTPUT_BUFFER: usize = 4096;

/// `fmt::Write` sink that stops accepting text at `limit` bytes
struct BoundedBuf {
    buf: String,
    limit: usize,
    truncated: bool,
}

impl Write for BoundedBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Once cut, later fragments must not fill the bytes left by a split char
        if self.truncated {
            return Ok(());
        }
        let room = self.limit - self.buf.len();
        if s.len() <= room {
            self.buf.push_str(s);
        } else {
            self.buf.push_str(truncate(s, room));
            self.truncated = true;
        }
        Ok(())
    }
}

/// Render `args` into at most `limit` bytes. The flag reports whether
/// anything was cut off.
pub fn format_bounded(args: fmt::Arguments<'_>, limit: usize) -> (String, bool) {
    let mut out = BoundedBuf {
        buf: String::new(),
        limit,
        truncated: false,
    };
    // BoundedBuf never reports an error
    let _ = out.write_fmt(args);
    (out.buf, out.truncated)
}

/// Longest prefix of `text` that fits in `max` bytes without splitting a char
pub(crate) fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
