//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::device::UPLOAD_DEVICE_SUFFIX;
use crate::error::{DuetError, Result};

/// Preference key holding the serialized instance map.
pub const DEFAULT_PREFERENCE_KEY: &str = "duet/instances";

/// Where the registry persists itself and how it names devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Preference key of the instance map.
    pub preference_key: String,
    /// Suffix appended to instance names to form device keys.
    pub device_suffix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            preference_key: DEFAULT_PREFERENCE_KEY.into(),
            device_suffix: UPLOAD_DEVICE_SUFFIX.into(),
        }
    }
}

impl RegistryConfig {
    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.preference_key.is_empty() {
            return Err(DuetError::Config("preference_key must not be empty".into()));
        }
        if self.device_suffix.is_empty() {
            return Err(DuetError::Config("device_suffix must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.preference_key, "duet/instances");
        assert_eq!(config.device_suffix, "-upload");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"preference_key": "nautilus/instances"}"#).unwrap();
        assert_eq!(config.preference_key, "nautilus/instances");
        assert_eq!(config.device_suffix, "-upload");
    }

    #[test]
    fn test_invalid_config() {
        let config = RegistryConfig {
            preference_key: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DuetError::Config(_))));

        let config = RegistryConfig {
            device_suffix: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DuetError::Config(_))));
    }
}
