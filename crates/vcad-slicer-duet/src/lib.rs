#![warn(missing_docs)]

//! Duet (RepRapFirmware) printer instances for the vcad slicer.
//!
//! This crate provides:
//! - A registry of named printer instances (base URL, Duet password,
//!   optional HTTP basic-auth credentials)
//! - Name and URL validation for instance dialogs
//! - Persistence of the registry as one JSON preference value
//! - Synchronisation of one upload device per instance with the host
//!
//! The host supplies two ports: an [`OutputDeviceManager`] that creates the
//! actual upload devices and a [`PreferenceStore`].
//!
//! # Example
//!
//! ```ignore
//! use vcad_slicer_duet::{InstanceProfile, InstanceRegistry, MemoryPreferences};
//!
//! let mut registry = InstanceRegistry::load(host_devices, MemoryPreferences::new());
//!
//! if registry.valid_name("", "nautilus") && registry.valid_url("", "http://10.0.0.5") {
//!     registry.save("", "nautilus", InstanceProfile::new("http://10.0.0.5", "reprap", "", ""))?;
//! }
//! assert_eq!(registry.url("nautilus"), Some("http://10.0.0.5/"));
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod prefs;
pub mod profile;
pub mod registry;
pub mod validate;

pub use config::{RegistryConfig, DEFAULT_PREFERENCE_KEY};
pub use device::{device_key, OutputDeviceManager, UploadDevice, UPLOAD_DEVICE_SUFFIX};
pub use error::{DuetError, Result};
pub use prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use profile::{
    normalize_url, parse_instances, serialize_instances, InstanceMap, InstanceProfile,
    EMPTY_INSTANCES,
};
pub use registry::{InstanceRegistry, RegistryEvent};
pub use validate::{valid_name, valid_url};
