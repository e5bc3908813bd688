//! Registry of named Duet printer instances.

use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::device::{device_key, OutputDeviceManager, UploadDevice};
use crate::error::{DuetError, Result};
use crate::prefs::PreferenceStore;
use crate::profile::{
    normalize_url, parse_instances, serialize_instances, InstanceMap, InstanceProfile,
    EMPTY_INSTANCES,
};
use crate::validate;

/// Change emitted after a mutation has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An instance was created or replaced.
    Saved(String),
    /// An instance was removed.
    Removed(String),
}

type Listener = Box<dyn FnMut(&RegistryEvent)>;

/// Named printer instances, kept in sync with the host's output devices
/// and preference store.
///
/// Each mutation writes the updated map to the preference store first and
/// only then adopts it, updates the device manager and notifies
/// subscribers. A failed write leaves the registry and devices untouched.
pub struct InstanceRegistry<D, P> {
    config: RegistryConfig,
    instances: InstanceMap,
    devices: D,
    prefs: P,
    listeners: Vec<Listener>,
}

impl<D: OutputDeviceManager, P: PreferenceStore> InstanceRegistry<D, P> {
    /// Load the registry with the default configuration.
    ///
    /// See [`InstanceRegistry::with_config`].
    pub fn load(devices: D, prefs: P) -> Self {
        Self::init(devices, prefs, RegistryConfig::default())
    }

    /// Load the registry from `prefs` and register a device per instance.
    ///
    /// Unreadable or malformed persisted data is logged and replaced by an
    /// empty registry. Only an invalid `config` is an error.
    pub fn with_config(devices: D, prefs: P, config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::init(devices, prefs, config))
    }

    fn init(devices: D, prefs: P, config: RegistryConfig) -> Self {
        let instances = match read_instances(&prefs, &config.preference_key) {
            Ok(instances) => instances,
            Err(e) => {
                warn!(
                    "Ignoring stored instances under {}: {}",
                    config.preference_key, e
                );
                InstanceMap::new()
            }
        };
        debug!("Loaded {} instances", instances.len());

        let mut registry = Self {
            config,
            instances,
            devices,
            prefs,
            listeners: Vec::new(),
        };
        registry.register_all();
        registry
    }

    fn register_all(&mut self) {
        for (name, profile) in &self.instances {
            self.devices.add_output_device(UploadDevice::new(
                name,
                profile.clone(),
                &self.config.device_suffix,
            ));
        }
    }

    /// Remove every instance's device from the device manager.
    ///
    /// The instances themselves stay registered and persisted; this is the
    /// counterpart of loading when the host unloads the plugin.
    pub fn shutdown(&mut self) {
        for name in self.instances.keys() {
            self.devices
                .remove_output_device(&device_key(name, &self.config.device_suffix));
        }
        debug!("Released {} instance devices", self.instances.len());
    }

    /// Call `listener` after every saved or removed instance.
    pub fn subscribe(&mut self, listener: impl FnMut(&RegistryEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Names of all registered instances, sorted.
    pub fn names(&self) -> Vec<String> {
        self.instances.keys().cloned().collect()
    }

    /// Profile registered under `name`.
    pub fn get(&self, name: &str) -> Option<&InstanceProfile> {
        self.instances.get(name)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    /// Number of registered instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no instance is registered.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// All instances.
    pub fn instances(&self) -> &InstanceMap {
        &self.instances
    }

    /// Base URL of `name`.
    pub fn url(&self, name: &str) -> Option<&str> {
        self.get(name).map(|p| p.url.as_str())
    }

    /// Duet password of `name`.
    pub fn duet_password(&self, name: &str) -> Option<&str> {
        self.get(name).map(|p| p.duet_password.as_str())
    }

    /// HTTP basic-auth user of `name`.
    pub fn http_user(&self, name: &str) -> Option<&str> {
        self.get(name).map(|p| p.http_user.as_str())
    }

    /// HTTP basic-auth password of `name`.
    pub fn http_password(&self, name: &str) -> Option<&str> {
        self.get(name).map(|p| p.http_password.as_str())
    }

    /// Create or replace an instance.
    ///
    /// A non-empty `old_name` marks an edit: that instance is removed first
    /// (even when it equals `name`) and must exist. The profile URL gets a
    /// trailing `/`. No validation happens here; check the input with
    /// [`valid_name`](Self::valid_name) and [`valid_url`](Self::valid_url)
    /// before calling.
    pub fn save(
        &mut self,
        old_name: &str,
        name: &str,
        mut profile: InstanceProfile,
    ) -> Result<()> {
        if !old_name.is_empty() {
            self.remove(old_name)?;
        }

        profile.url = normalize_url(profile.url);
        let mut updated = self.instances.clone();
        updated.insert(name.to_string(), profile.clone());
        self.commit(updated)?;

        self.devices.add_output_device(UploadDevice::new(
            name,
            profile,
            &self.config.device_suffix,
        ));
        self.notify(RegistryEvent::Saved(name.to_string()));

        debug!("Instance saved: {}", name);
        Ok(())
    }

    /// Remove an instance and its device.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if !self.instances.contains_key(name) {
            return Err(DuetError::UnknownInstance(name.to_string()));
        }

        let mut updated = self.instances.clone();
        updated.remove(name);
        self.commit(updated)?;

        self.devices
            .remove_output_device(&device_key(name, &self.config.device_suffix));
        self.notify(RegistryEvent::Removed(name.to_string()));

        debug!("Instance removed: {}", name);
        Ok(())
    }

    /// Check a proposed instance name against the registered ones.
    pub fn valid_name(&self, old_name: &str, new_name: &str) -> bool {
        validate::valid_name(&self.instances, old_name, new_name)
    }

    /// Check a proposed base URL.
    pub fn valid_url(&self, old_url: &str, new_url: &str) -> bool {
        validate::valid_url(old_url, new_url)
    }

    /// Registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The device manager.
    pub fn devices(&self) -> &D {
        &self.devices
    }

    /// The preference store.
    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    /// Persist `updated` and make it the current map.
    fn commit(&mut self, updated: InstanceMap) -> Result<()> {
        let json = serialize_instances(&updated)?;
        self.prefs.set_value(&self.config.preference_key, &json)?;
        self.instances = updated;
        Ok(())
    }

    fn notify(&mut self, event: RegistryEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

fn read_instances<P: PreferenceStore>(prefs: &P, key: &str) -> Result<InstanceMap> {
    let json = prefs
        .value(key)?
        .unwrap_or_else(|| EMPTY_INSTANCES.to_string());
    parse_instances(&json)
}
