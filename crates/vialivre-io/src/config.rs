use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::IconError;

/// Largest logo side accepted from a config file.
pub const MAX_ICON_SIZE: u32 = 8192;
/// Largest maskable padding factor accepted from a config file.
pub const MAX_MASKABLE_PADDING: f64 = 4.0;

/// What the generator writes and where. Every field has a default, so an
/// empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root that all outputs are written under.
    pub output_dir: PathBuf,
    /// Subdirectory of `output_dir` holding the app icons.
    pub icons_dir: String,
    pub icon_sizes: Vec<u32>,
    pub maskable_sizes: Vec<u32>,
    /// Maskable canvas side is `round(size * maskable_padding)`.
    pub maskable_padding: f64,
    pub favicon_size: u32,
    /// File name of the favicon, written directly under `output_dir`.
    pub favicon_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            icons_dir: "icons".to_string(),
            icon_sizes: vec![192, 512],
            maskable_sizes: vec![192, 512],
            maskable_padding: 1.25,
            favicon_size: 64,
            favicon_name: "favicon.png".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, IconError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, IconError> {
        let json = fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), IconError> {
        let mut sizes = self
            .icon_sizes
            .iter()
            .chain(&self.maskable_sizes)
            .chain(std::iter::once(&self.favicon_size));
        if let Some(&bad) = sizes.find(|&&s| s == 0 || s > MAX_ICON_SIZE) {
            return Err(IconError::InvalidConfig(format!(
                "sizes must be between 1 and {}, got {}",
                MAX_ICON_SIZE, bad
            )));
        }
        if !(1.0..=MAX_MASKABLE_PADDING).contains(&self.maskable_padding) {
            return Err(IconError::InvalidConfig(format!(
                "maskable_padding must be between 1.0 and {}, got {}",
                MAX_MASKABLE_PADDING, self.maskable_padding
            )));
        }
        if self.favicon_name.is_empty() || self.icons_dir.is_empty() {
            return Err(IconError::InvalidConfig(
                "icons_dir and favicon_name must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn icons_path(&self) -> PathBuf {
        self.output_dir.join(&self.icons_dir)
    }

    /// Name of a regular icon relative to `output_dir`, e.g. `icons/Icon-192.png`.
    pub fn icon_name(&self, size: u32) -> String {
        format!("{}/Icon-{}.png", self.icons_dir, size)
    }

    pub fn maskable_name(&self, size: u32) -> String {
        format!("{}/Icon-maskable-{}.png", self.icons_dir, size)
    }
}
