//! Configuration for a console

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_CAPACITY, DEFAULT_HISTORY_ENTRIES, DEFAULT_MAX_INPUT_LENGTH, DEFAULT_OUTPUT_BUFFER,
    DEFAULT_SLIDE, DEFAULT_TAB_WIDTH,
};
use crate::error::{Error, Result};

/// Width and height of one glyph cell in pixels
pub const CHAR_PIXEL_W: u32 = 8;
pub const CHAR_PIXEL_H: u32 = 8;

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Cells per scrollback line
    pub columns: usize,
    /// Output rows in the viewport
    pub rows: usize,
    /// Lines kept in the scrollback ring
    pub scrollback_lines: usize,
    /// Remembered command lines
    pub history_entries: usize,
    /// Input line size in bytes (one byte is reserved)
    pub max_input_length: usize,
    /// Tab stop interval
    pub tab_width: usize,
    /// Ceiling for formatted output in bytes
    pub output_buffer_bytes: usize,
    /// Show/hide slide duration in milliseconds
    pub slide_duration_ms: u64,
    /// Key that toggles the console
    pub toggle_key: char,
    /// Write the initialization banner on creation
    pub banner: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 25,
            scrollback_lines: DEFAULT_CAPACITY,
            history_entries: DEFAULT_HISTORY_ENTRIES,
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            tab_width: DEFAULT_TAB_WIDTH,
            output_buffer_bytes: DEFAULT_OUTPUT_BUFFER,
            slide_duration_ms: DEFAULT_SLIDE.as_millis() as u64,
            toggle_key: '`',
            banner: true,
        }
    }
}

impl ConsoleConfig {
    /// Derive the text geometry from a viewport size in pixels
    pub fn from_viewport(width_px: u32, height_px: u32) -> Self {
        Self {
            columns: (width_px / CHAR_PIXEL_W) as usize,
            rows: (height_px / CHAR_PIXEL_H) as usize,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Slide duration as a `Duration`
    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_duration_ms)
    }

    /// Check every bound the buffers rely on
    pub fn validate(&self) -> Result<()> {
        if self.columns < 2 {
            return Err(Error::InvalidConfig(format!(
                "columns must be at least 2, got {}",
                self.columns
            )));
        }
        if self.rows == 0 {
            return Err(Error::InvalidConfig("rows must be at least 1".to_string()));
        }
        if self.scrollback_lines == 0 {
            return Err(Error::InvalidConfig(
                "scrollback_lines must be at least 1".to_string(),
            ));
        }
        if self.history_entries == 0 {
            return Err(Error::InvalidConfig(
                "history_entries must be at least 1".to_string(),
            ));
        }
        if self.max_input_length < 2 {
            return Err(Error::InvalidConfig(format!(
                "max_input_length must be at least 2, got {}",
                self.max_input_length
            )));
        }
        if self.tab_width == 0 {
            return Err(Error::InvalidConfig("tab_width must be at least 1".to_string()));
        }
        if self.output_buffer_bytes == 0 {
            return Err(Error::InvalidConfig(
                "output_buffer_bytes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ConsoleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scrollback_lines, 100);
        assert_eq!(config.history_entries, 25);
        assert_eq!(config.max_input_length, 256);
        assert_eq!(config.slide_duration(), Duration::from_millis(230));
    }

    #[test]
    fn test_from_viewport() {
        let config = ConsoleConfig::from_viewport(640, 480);
        assert_eq!(config.columns, 80);
        assert_eq!(config.rows, 60);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ConsoleConfig::from_json_str(r#"{"columns": 40, "banner": false}"#).unwrap();
        assert_eq!(config.columns, 40);
        assert!(!config.banner);
        assert_eq!(config.rows, 25);
    }

    #[test]
    fn test_from_json_rejects_bad_bounds() {
        let err = ConsoleConfig::from_json_str(r#"{"columns": 1}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = ConsoleConfig::from_json_str(r#"{"tab_width": 0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = ConsoleConfig::from_json_str("{columns").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rows": 10, "history_entries": 5}}"#).unwrap();

        let config = ConsoleConfig::load(file.path()).unwrap();
        assert_eq!(config.rows, 10);
        assert_eq!(config.history_entries, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConsoleConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
