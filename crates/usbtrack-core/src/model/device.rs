/// Device snapshot types.
///
/// A [`Device`] is one mounted volume as observed at snapshot time. Devices
/// are recognised across snapshots by their [`DeviceKey`] (device path plus
/// mount point); the formatted capacity rides along but never takes part in
/// identity, so a volume whose reported size changes is still the same
/// device.
use serde::Serialize;
use std::collections::BTreeMap;

/// How the OS classifies a mounted volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MountKind {
    Fixed,
    Removable,
    Network,
    CdRom,
    Unknown,
}

impl MountKind {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Removable => "Removable",
            Self::Network => "Network",
            Self::CdRom => "CD-ROM",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether volumes of this kind are tracked.
    ///
    /// Both removable and fixed mounts pass, so in practice most local
    /// volumes are tracked, not only hot-plugged ones.
    pub fn is_tracked(self) -> bool {
        matches!(self, Self::Removable | Self::Fixed)
    }
}

/// Identity of a device across snapshots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DeviceKey {
    /// OS device path, e.g. `/dev/sdb1` or `E:\`.
    pub identifier: String,
    /// Path the volume is mounted at.
    pub mount_point: String,
}

impl DeviceKey {
    pub fn new(identifier: impl Into<String>, mount_point: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            mount_point: mount_point.into(),
        }
    }
}

/// One mounted volume observed during a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    /// OS device path.
    pub identifier: String,
    /// Filesystem path the device is mounted at.
    pub mount_point: String,
    /// Formatted total capacity, e.g. `"16.00 GB"`.
    pub capacity: String,
    /// Total capacity in bytes.
    pub total_bytes: u64,
    /// OS classification of the mount.
    pub kind: MountKind,
}

impl Device {
    /// Identity key of this device.
    pub fn key(&self) -> DeviceKey {
        DeviceKey::new(self.identifier.clone(), self.mount_point.clone())
    }
}

/// The set of devices mounted at one instant, unique by [`DeviceKey`].
///
/// Iteration follows key order, which keeps tables stable between frames.
/// Callers must not read meaning into the order of events produced from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSet {
    devices: BTreeMap<DeviceKey, Device>,
}

impl DeviceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a device, replacing any previous device with the same identity.
    pub fn insert(&mut self, device: Device) -> Option<Device> {
        self.devices.insert(device.key(), device)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn contains(&self, key: &DeviceKey) -> bool {
        self.devices.contains_key(key)
    }

    pub fn get(&self, key: &DeviceKey) -> Option<&Device> {
        self.devices.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Devices in `self` whose identity is absent from `other`.
    pub fn difference<'a>(&'a self, other: &'a DeviceSet) -> impl Iterator<Item = &'a Device> {
        self.devices
            .iter()
            .filter(|(key, _)| !other.devices.contains_key(*key))
            .map(|(_, device)| device)
    }
}

impl FromIterator<Device> for DeviceSet {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        let mut set = DeviceSet::new();
        for device in iter {
            set.insert(device);
        }
        set
    }
}

impl<'a> IntoIterator for &'a DeviceSet {
    type Item = &'a Device;
    type IntoIter = std::collections::btree_map::Values<'a, DeviceKey, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.values()
    }
}
