//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::preview::{PreviewLimits, EXCERPT_CHARS, MAX_IMAGE_WIDTH, TEXT_SIZE_CAP};
use crate::fs::stat::DEFAULT_DATE_FORMAT;
use crate::nav::state::trash_dir_convention;
use crate::view::ViewMode;

/// Top-level application configuration.
///
/// All fields have sensible defaults so colfm works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::Unreadable`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::Unreadable(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Loads `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(CoreError::NotFound(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("config: using defaults, {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// The trash directory: the configured override, else the convention.
    pub fn trash_dir(&self) -> Option<PathBuf> {
        self.general.trash_dir.clone().or_else(trash_dir_convention)
    }
}

/// Resolves the directory holding `config.toml` and `keymap.toml`.
///
/// A `config/` directory under `cwd` wins; otherwise the platform config
/// directory's `colfm/` subdirectory.
pub fn config_dir(cwd: &Path) -> Option<PathBuf> {
    let local = cwd.join("config");
    if local.is_dir() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("colfm"))
}

/// General file-browsing preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default)]
    pub start_view: ViewMode,
    /// Overrides the `~/.local/share/Trash/files` convention.
    #[serde(default)]
    pub trash_dir: Option<PathBuf>,
}

/// Preview pipeline limits and formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_max_image_width")]
    pub max_image_width: u32,
    #[serde(default = "default_text_size_cap")]
    pub text_size_cap: u64,
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl PreviewConfig {
    pub fn limits(&self) -> PreviewLimits {
        PreviewLimits {
            max_image_width: self.max_image_width.max(1),
            text_size_cap: self.text_size_cap,
            excerpt_chars: self.excerpt_chars,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_image_width: default_max_image_width(),
            text_size_cap: default_text_size_cap(),
            excerpt_chars: default_excerpt_chars(),
            date_format: default_date_format(),
        }
    }
}

/// Frontend display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Width of one icon-grid cell, in terminal columns.
    #[serde(default = "default_icon_cell_width")]
    pub icon_cell_width: u16,
    /// How long transient status messages stay visible.
    #[serde(default = "default_show_status_seconds")]
    pub show_status_seconds: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            icon_cell_width: default_icon_cell_width(),
            show_status_seconds: default_show_status_seconds(),
        }
    }
}

fn default_max_image_width() -> u32 {
    MAX_IMAGE_WIDTH
}

fn default_text_size_cap() -> u64 {
    TEXT_SIZE_CAP
}

fn default_excerpt_chars() -> usize {
    EXCERPT_CHARS
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_icon_cell_width() -> u16 {
    16
}

fn default_show_status_seconds() -> u64 {
    2
}
