//! Optional TOML configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use vcad_slicer_duet::RegistryConfig;

/// Preference file used when neither the command line nor the config file
/// names one.
pub const DEFAULT_PREFS_FILE: &str = "vcad-duet.json";

/// Contents of a `vcad-duet.toml` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preference file holding the instance map.
    pub preferences: Option<PathBuf>,
    /// Registry options.
    pub registry: RegistryConfig,
}

impl Settings {
    /// Read settings from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Resolve the preference file: explicit path first, then the config
    /// file, then [`DEFAULT_PREFS_FILE`].
    pub fn preferences_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.preferences.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_FILE))
    }
}
