//! Canonical inventory model: regions, locations, devices, sub-devices

use serde::{Deserialize, Serialize};

/// Top-level inventory unit, one per source worksheet
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// A site or node within a region
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub network_id: String,
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// A network interface entry within a location
///
/// `ip` holds the literal cell text: a single address, a range ("A to B")
/// or a joined list. It is never expanded here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub sub_devices: Vec<SubDevice>,
}

/// Hand-authored single-address breakdown of a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubDevice {
    pub name: String,
    pub ip: String,
}

impl Region {
    pub fn new(name: impl Into<String>, locations: Vec<Location>) -> Self {
        Region {
            name: name.into(),
            locations,
        }
    }

    /// Iterate every device in this region, in sheet order
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.locations.iter().flat_map(|l| l.devices.iter())
    }
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Location {
            name: name.into(),
            network_id: String::new(),
            devices: Vec::new(),
        }
    }
}

impl Device {
    pub fn new(
        device_type: impl Into<String>,
        ip: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Device {
            device_type: device_type.into(),
            ip: ip.into(),
            description: description.into(),
            status: status.into(),
            sub_devices: Vec::new(),
        }
    }
}
