//! Command implementations over an instance registry.

use std::collections::BTreeSet;
use std::io::Write;

use anyhow::{anyhow, bail, Result};
use tracing::info;
use vcad_slicer_duet::{
    InstanceProfile, InstanceRegistry, OutputDeviceManager, PreferenceStore, UploadDevice,
};

/// Device manager that only logs what the host would create.
#[derive(Debug, Default)]
pub struct LoggingDevices {
    active: BTreeSet<String>,
}

impl LoggingDevices {
    /// Keys of the devices currently registered.
    pub fn active(&self) -> &BTreeSet<String> {
        &self.active
    }
}

impl OutputDeviceManager for LoggingDevices {
    fn add_output_device(&mut self, device: UploadDevice) {
        info!("Upload device {} -> {}", device.key, device.profile.url);
        self.active.insert(device.key);
    }

    fn remove_output_device(&mut self, key: &str) {
        info!("Upload device {} removed", key);
        self.active.remove(key);
    }
}

/// Optional replacements for an existing instance's fields.
#[derive(Debug, Default)]
pub struct Changes {
    pub name: Option<String>,
    pub url: Option<String>,
    pub duet_password: Option<String>,
    pub http_user: Option<String>,
    pub http_password: Option<String>,
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "(none)"
    } else {
        "********"
    }
}

fn invalid_url(url: &str) -> anyhow::Error {
    anyhow!(
        "invalid URL {url:?}: use http:// or https:// and put credentials in \
         --http-user/--http-password"
    )
}

/// Print every instance name, one per line.
pub fn list<D, P>(registry: &InstanceRegistry<D, P>, out: &mut impl Write) -> Result<()>
where
    D: OutputDeviceManager,
    P: PreferenceStore,
{
    for name in registry.names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Print one instance with its passwords masked.
pub fn show<D, P>(
    registry: &InstanceRegistry<D, P>,
    name: &str,
    out: &mut impl Write,
) -> Result<()>
where
    D: OutputDeviceManager,
    P: PreferenceStore,
{
    let profile = registry
        .get(name)
        .ok_or_else(|| anyhow!("no instance named {name:?}"))?;

    writeln!(out, "name:          {name}")?;
    writeln!(out, "url:           {}", profile.url)?;
    writeln!(out, "duet password: {}", mask(&profile.duet_password))?;
    if profile.has_http_auth() {
        writeln!(out, "http user:     {}", profile.http_user)?;
        writeln!(out, "http password: {}", mask(&profile.http_password))?;
    }
    Ok(())
}

/// Validate and register a new instance.
pub fn add<D, P>(
    registry: &mut InstanceRegistry<D, P>,
    name: &str,
    profile: InstanceProfile,
) -> Result<()>
where
    D: OutputDeviceManager,
    P: PreferenceStore,
{
    if !registry.valid_name("", name) {
        bail!("instance name {name:?} is empty or already in use");
    }
    if !registry.valid_url("", &profile.url) {
        return Err(invalid_url(&profile.url));
    }
    registry.save("", name, profile)?;
    Ok(())
}

/// Validate and apply `changes` to the instance `old_name`.
pub fn edit<D, P>(
    registry: &mut InstanceRegistry<D, P>,
    old_name: &str,
    changes: Changes,
) -> Result<()>
where
    D: OutputDeviceManager,
    P: PreferenceStore,
{
    let current = registry
        .get(old_name)
        .cloned()
        .ok_or_else(|| anyhow!("no instance named {old_name:?}"))?;

    let name = changes.name.unwrap_or_else(|| old_name.to_string());
    let profile = InstanceProfile {
        url: changes.url.unwrap_or_else(|| current.url.clone()),
        duet_password: changes.duet_password.unwrap_or(current.duet_password),
        http_user: changes.http_user.unwrap_or(current.http_user),
        http_password: changes.http_password.unwrap_or(current.http_password),
    };

    if !registry.valid_name(old_name, &name) {
        bail!("instance name {name:?} is empty or already in use");
    }
    if !registry.valid_url(&current.url, &profile.url) {
        return Err(invalid_url(&profile.url));
    }
    registry.save(old_name, &name, profile)?;
    Ok(())
}

/// Remove an existing instance.
pub fn remove<D, P>(registry: &mut InstanceRegistry<D, P>, name: &str) -> Result<()>
where
    D: OutputDeviceManager,
    P: PreferenceStore,
{
    if !registry.contains(name) {
        bail!("no instance named {name:?}");
    }
    registry.remove(name)?;
    Ok(())
}

/// Report whether `url` would be accepted as a printer address.
pub fn check_url(url: &str, out: &mut impl Write) -> Result<()> {
    if !vcad_slicer_duet::valid_url("", url) {
        return Err(invalid_url(url));
    }
    writeln!(out, "{url}: ok")?;
    Ok(())
}
