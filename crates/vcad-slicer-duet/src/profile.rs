//! Printer instance connection profiles and their persisted form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DuetError, Result};

/// Connection settings for one Duet printer instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstanceProfile {
    /// Base URL of the printer's web interface, always ending in `/`.
    pub url: String,
    /// RepRapFirmware access password (empty if none).
    pub duet_password: String,
    /// HTTP basic-auth user (empty if none).
    pub http_user: String,
    /// HTTP basic-auth password (empty if none).
    pub http_password: String,
}

impl InstanceProfile {
    /// Create a profile, normalizing the URL.
    pub fn new(
        url: impl Into<String>,
        duet_password: impl Into<String>,
        http_user: impl Into<String>,
        http_password: impl Into<String>,
    ) -> Self {
        Self {
            url: normalize_url(url.into()),
            duet_password: duet_password.into(),
            http_user: http_user.into(),
            http_password: http_password.into(),
        }
    }

    /// Whether HTTP basic-auth credentials are configured.
    pub fn has_http_auth(&self) -> bool {
        !self.http_user.is_empty()
    }
}

/// Append a trailing `/` to `url` unless it already has one.
pub fn normalize_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

/// Instances keyed by name.
pub type InstanceMap = BTreeMap<String, InstanceProfile>;

/// Serialized form of an empty instance map.
pub const EMPTY_INSTANCES: &str = "{}";

/// Parse a persisted instance map.
///
/// Blank input yields an empty map. Anything that is not an object of
/// profile objects is a [`DuetError::Parse`]. Names are taken as stored,
/// including an empty one, so whatever `save` wrote loads back unchanged.
pub fn parse_instances(json: &str) -> Result<InstanceMap> {
    if json.trim().is_empty() {
        return Ok(InstanceMap::new());
    }

    serde_json::from_str(json).map_err(|e| DuetError::Parse(e.to_string()))
}

/// Serialize an instance map for the preference store.
pub fn serialize_instances(instances: &InstanceMap) -> Result<String> {
    Ok(serde_json::to_string(instances)?)
}
