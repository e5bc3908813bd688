//! Validation of user-entered instance names and URLs.
//!
//! These checks return booleans so a dialog can enable or disable its save
//! button; the registry's mutating operations do not repeat them.

use regex::Regex;
use std::sync::LazyLock;

use crate::profile::InstanceMap;

/// Scheme plus at least one more character on the same line.
static HTTP_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://.").unwrap());

/// Check a proposed instance name.
///
/// An empty name is never valid. Keeping the current name while editing is
/// valid; any other name must not already be registered.
pub fn valid_name(instances: &InstanceMap, old_name: &str, new_name: &str) -> bool {
    if new_name.is_empty() {
        return false;
    }
    if new_name == old_name {
        return true;
    }
    !instances.contains_key(new_name)
}

/// Check a proposed printer base URL.
///
/// `_old_url` is accepted for symmetry with [`valid_name`] but does not take
/// part in the check: an unchanged URL gets no exemption.
pub fn valid_url(_old_url: &str, new_url: &str) -> bool {
    // UNC paths
    if new_url.starts_with("\\\\") {
        return false;
    }
    if !HTTP_URL.is_match(new_url) {
        return false;
    }
    // Credentials belong in the separate HTTP user/password fields.
    if new_url.contains('@') {
        return false;
    }
    true
}
