use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{default_palette, Rgba};
use crate::history::HistoryOptions;

pub const CONFIG_FILE_NAME: &str = "lignum_paint.json";
/// Largest canvas side the host can upload as a single texture.
pub const MAX_CANVAS_SIZE: i32 = u16::MAX as i32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("canvas size must be within 1..={max}, got {width}x{height}", max = MAX_CANVAS_SIZE)]
    InvalidCanvasSize { width: i32, height: i32 },
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("history limit must be at least 1")]
    ZeroHistoryLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub background: Rgba,
    pub palette: Vec<Rgba>,
    pub undo_key: u32,
    pub redo_key: u32,
    pub history: HistoryOptions,
    /// evdev node of a pen tablet, e.g. `/dev/input/event15`. Linux only.
    pub stylus_device: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: Rgba::WHITE,
            palette: default_palette(),
            undo_key: 'Z' as u32,
            redo_key: 'Y' as u32,
            history: HistoryOptions::default(),
            stylus_device: None,
        }
    }
}

impl AppConfig {
    /// Loads the config at `path`, falling back to defaults when the file is missing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = 1..=MAX_CANVAS_SIZE;
        if !valid.contains(&self.canvas_width) || !valid.contains(&self.canvas_height) {
            return Err(ConfigError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.history.limit == Some(0) {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test_log::test]
    fn empty_object_gives_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test_log::test]
    fn partial_config_overrides_fields() {
        let config = AppConfig::from_json(
            r##"{
                "canvas_width": 320,
                "background": "#000000",
                "palette": ["#ff0000", "#00ff00"],
                "history": { "clear_redo_on_stroke": true }
            }"##,
        )
        .unwrap();

        assert_eq!(config.canvas_width, 320);
        assert_eq!(config.canvas_height, 600);
        assert_eq!(config.background, Rgba::BLACK);
        assert_eq!(config.palette, vec![Rgba::rgb(255, 0, 0), Rgba::rgb(0, 255, 0)]);
        assert!(config.history.clear_redo_on_stroke);
        assert_eq!(config.history.limit, None);
        assert_eq!(config.undo_key, 90);
        assert_eq!(config.redo_key, 89);
    }

    #[test_log::test]
    fn accepts_largest_texture_size() {
        let config =
            AppConfig::from_json(r#"{ "canvas_width": 65535, "canvas_height": 1 }"#).unwrap();
        assert_eq!(config.canvas_width, MAX_CANVAS_SIZE);
    }

    #[test_log::test]
    fn rejects_invalid_values() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "canvas_height": 0 }"#),
            Err(ConfigError::InvalidCanvasSize { height: 0, .. })
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "canvas_width": 70000 }"#),
            Err(ConfigError::InvalidCanvasSize { width: 70000, .. })
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "palette": [] }"#),
            Err(ConfigError::EmptyPalette)
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "history": { "limit": 0 } }"#),
            Err(ConfigError::ZeroHistoryLimit)
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "background": "white" }"#),
            Err(ConfigError::Json(_))
        ));
    }
}
