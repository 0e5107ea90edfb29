//! User configuration.
//!
//! Stored as TOML at `<config dir>/tailwind-prism/config.toml`. Every field
//! has a default, so partial files (or no file at all) are fine:
//!
//! ```toml
//! enabled = true
//! highlight_mode = "cursor"
//! color_preset = "Contrast"
//!
//! [colors]
//! important = "#ff0055"
//! ```

use prism_syntax::HighlightMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colors::{ColorOverrides, Preset, PrismColors, resolve_colors};
use crate::event::Status;

/// Highlighting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    /// Paint class lists at all
    pub enabled: bool,

    /// Scan the whole document, or only the region under the cursor
    pub highlight_mode: HighlightMode,

    /// Name of the built-in palette
    pub color_preset: String,

    /// Per-category overrides on top of the preset
    pub colors: ColorOverrides,
}

impl PrismConfig {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tailwind-prism").join("config.toml"))
    }

    /// Saves the config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path()?)
    }

    /// Saves the config to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The four colors this config paints with.
    pub fn resolved_colors(&self) -> PrismColors {
        resolve_colors(&self.color_preset, &self.colors)
    }

    /// What a status indicator should show.
    pub fn status(&self) -> Status {
        Status {
            enabled: self.enabled,
            mode: self.highlight_mode,
        }
    }
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            highlight_mode: HighlightMode::Full,
            color_preset: Preset::default().name().to_string(),
            colors: ColorOverrides::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;

    #[test]
    fn test_default_config() {
        let config = PrismConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.highlight_mode, HighlightMode::Full);
        assert_eq!(config.color_preset, "Calm");
        assert!(config.colors.is_empty());
    }

    #[test]
    fn test_partial_file() {
        let config: PrismConfig = toml::from_str(
            r##"
            highlight_mode = "cursor"

            [colors]
            important = "#f05"
            "##,
        )
        .unwrap();

        assert!(!config.enabled);
        assert_eq!(config.highlight_mode, HighlightMode::Cursor);
        assert_eq!(config.resolved_colors().important, Color::rgb(0xFF, 0x00, 0x55));
        assert_eq!(config.resolved_colors().variant, Preset::Calm.colors().variant);
    }

    #[test]
    fn test_unknown_mode_is_a_parse_error() {
        assert!(toml::from_str::<PrismConfig>("highlight_mode = \"partial\"").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = PrismConfig {
            enabled: true,
            highlight_mode: HighlightMode::Cursor,
            color_preset: "Muted".to_string(),
            colors: ColorOverrides {
                utility: Some("#abcdef".to_string()),
                ..Default::default()
            },
        };
        config.save_to(&path).unwrap();

        assert_eq!(PrismConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = PrismConfig::load_from(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_status_follows_config() {
        let mut config = PrismConfig::default();
        assert_eq!(config.status().to_string(), "Prism · Off");
        config.enabled = true;
        config.highlight_mode = HighlightMode::Cursor;
        assert_eq!(config.status().to_string(), "Prism · cursor");
    }
}
