//! Output device port.
//!
//! The host's output-device framework creates the upload-capable devices;
//! the registry only tells it which ones should exist.

use crate::profile::InstanceProfile;

/// Suffix appended to an instance name to form its device key.
pub const UPLOAD_DEVICE_SUFFIX: &str = "-upload";

/// Description of an upload device for one printer instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDevice {
    /// Key under which the host tracks the device.
    pub key: String,
    /// Instance name shown to the user.
    pub name: String,
    /// Connection settings.
    pub profile: InstanceProfile,
}

impl UploadDevice {
    /// Build the device for `name`, keyed by `name` plus `suffix`.
    pub fn new(name: &str, profile: InstanceProfile, suffix: &str) -> Self {
        Self {
            key: device_key(name, suffix),
            name: name.to_string(),
            profile,
        }
    }
}

/// Device key for an instance name.
pub fn device_key(name: &str, suffix: &str) -> String {
    format!("{name}{suffix}")
}

/// Host-side manager of output devices.
pub trait OutputDeviceManager {
    /// Install a device, replacing any device with the same key.
    fn add_output_device(&mut self, device: UploadDevice);

    /// Remove the device with `key`, if present.
    fn remove_output_device(&mut self, key: &str);
}
