//! Configuration for the terminal engine

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Color;

/// Terminal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial width in columns
    pub columns: usize,
    /// Initial height in rows
    pub rows: usize,
    /// Maximum scrollback lines
    pub scrollback_lines: usize,
    /// Colors used to resolve palette and default cell colors
    pub palette: ColorPalette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 24,
            scrollback_lines: 10_000,
            palette: ColorPalette::default(),
        }
    }
}

/// Color palette configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    /// Default foreground color
    pub foreground: (u8, u8, u8),
    /// Default background color
    pub background: (u8, u8, u8),
    /// The 16 base colors (0-15)
    pub ansi: [(u8, u8, u8); 16],
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            foreground: (192, 192, 192),
            background: (0, 0, 0),
            ansi: [
                (0, 0, 0),       // 0: Black
                (128, 0, 0),     // 1: Red
                (0, 128, 0),     // 2: Green
                (128, 128, 0),   // 3: Yellow
                (0, 0, 128),     // 4: Blue
                (128, 0, 128),   // 5: Magenta
                (0, 128, 128),   // 6: Cyan
                (192, 192, 192), // 7: White
                (128, 128, 128), // 8: Bright Black
                (255, 0, 0),     // 9: Bright Red
                (0, 255, 0),     // 10: Bright Green
                (255, 255, 0),   // 11: Bright Yellow
                (0, 0, 255),     // 12: Bright Blue
                (255, 0, 255),   // 13: Bright Magenta
                (0, 255, 255),   // 14: Bright Cyan
                (255, 255, 255), // 15: Bright White
            ],
        }
    }
}

impl ColorPalette {
    /// Convert a cell color to RGB
    pub fn resolve(&self, color: Color, is_foreground: bool) -> (u8, u8, u8) {
        match color {
            Color::Default => {
                if is_foreground {
                    self.foreground
                } else {
                    self.background
                }
            }
            Color::Indexed(i) => self.ansi[(i & 0x0F) as usize],
            Color::Rgb(r, g, b) => (r, g, b),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from `path`, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "using default configuration");
                Self::default()
            }
        }
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid(format!(
                "screen size {}x{} must be non-zero",
                self.columns, self.rows
            )));
        }
        if self.scrollback_lines == 0 {
            return Err(ConfigError::Invalid(
                "scrollback_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
