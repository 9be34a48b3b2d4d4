/// Volume reader — turns the OS view of mounted partitions into a
/// [`DeviceSet`].
///
/// Each call enumerates partitions, keeps the removable and fixed ones,
/// probes their capacity, and formats it. A partition whose probe fails is
/// left out of the result; one bad mount never fails the whole snapshot.
use crate::error::{ProbeError, VolumeError};
use crate::model::size::format_size;
use crate::model::{Device, DeviceSet, MountKind};
use std::sync::Arc;
use tracing::{debug, warn};

/// One mounted partition as reported by the OS, before probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// OS device path, e.g. `/dev/sdb1` or `E:\`.
    pub device: String,
    /// Path the partition is mounted at.
    pub mount_point: String,
    /// OS classification of the mount.
    pub kind: MountKind,
    /// Total size when the platform reports it during enumeration.
    pub total_hint: Option<u64>,
}

/// Source of mounted partitions and their capacities.
///
/// Implementations must return quickly; the monitor calls them once per tick.
pub trait VolumeSource: Send + Sync {
    /// All currently mounted partitions.
    fn partitions(&self) -> Result<Vec<Partition>, VolumeError>;

    /// Total capacity of `partition` in bytes.
    fn capacity(&self, partition: &Partition) -> Result<u64, ProbeError>;
}

/// Reads the current [`DeviceSet`] from a [`VolumeSource`].
#[derive(Clone)]
pub struct VolumeReader {
    source: Arc<dyn VolumeSource>,
}

impl VolumeReader {
    pub fn new(source: impl VolumeSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Reader backed by the host operating system.
    pub fn system() -> Self {
        Self::new(super::SystemVolumes::new())
    }

    /// Snapshot the mounted devices, reporting enumeration failure.
    ///
    /// Per-partition probe failures are logged at debug level and the
    /// partition is skipped.
    pub fn try_snapshot(&self) -> Result<DeviceSet, VolumeError> {
        let partitions = self.source.partitions()?;
        let mut devices = DeviceSet::new();

        for partition in partitions {
            if !partition.kind.is_tracked() {
                continue;
            }
            match self.source.capacity(&partition) {
                Ok(total_bytes) => {
                    devices.insert(Device {
                        capacity: format_size(total_bytes),
                        total_bytes,
                        kind: partition.kind,
                        identifier: partition.device,
                        mount_point: partition.mount_point,
                    });
                }
                Err(e) => {
                    debug!("Skipping {}: {}", partition.device, e);
                }
            }
        }

        Ok(devices)
    }

    /// Snapshot the mounted devices. Enumeration failure yields an empty set.
    pub fn snapshot(&self) -> DeviceSet {
        self.try_snapshot().unwrap_or_else(|e| {
            warn!("{e}");
            DeviceSet::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeviceKey;
    use std::io;

    struct FixedSource {
        partitions: Vec<Partition>,
        fail_enumeration: bool,
    }

    impl VolumeSource for FixedSource {
        fn partitions(&self) -> Result<Vec<Partition>, VolumeError> {
            if self.fail_enumeration {
                return Err(VolumeError::Enumeration("mount table unreadable".into()));
            }
            Ok(self.partitions.clone())
        }

        fn capacity(&self, partition: &Partition) -> Result<u64, ProbeError> {
            partition.total_hint.ok_or_else(|| ProbeError::Inaccessible {
                mount_point: partition.mount_point.clone(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }
    }

    fn partition(device: &str, mount: &str, kind: MountKind, total: Option<u64>) -> Partition {
        Partition {
            device: device.to_owned(),
            mount_point: mount.to_owned(),
            kind,
            total_hint: total,
        }
    }

    fn reader(partitions: Vec<Partition>) -> VolumeReader {
        VolumeReader::new(FixedSource {
            partitions,
            fail_enumeration: false,
        })
    }

    #[test]
    fn removable_and_fixed_are_both_tracked() {
        let snapshot = reader(vec![
            partition("/dev/sda1", "/", MountKind::Fixed, Some(512 << 30)),
            partition("/dev/sdb1", "/mnt/usb", MountKind::Removable, Some(16 << 30)),
            partition("server:/share", "/mnt/nfs", MountKind::Network, Some(1 << 40)),
            partition("/dev/sr0", "/media/cdrom", MountKind::CdRom, Some(700 << 20)),
        ])
        .snapshot();

        assert_eq!(snapshot.len(), 2);
        let usb = snapshot
            .get(&DeviceKey::new("/dev/sdb1", "/mnt/usb"))
            .expect("usb stick must be tracked");
        assert_eq!(usb.capacity, "16.00 GB");
        assert_eq!(usb.total_bytes, 16 << 30);
        assert!(snapshot.contains(&DeviceKey::new("/dev/sda1", "/")));
    }

    #[test]
    fn probe_failure_excludes_only_that_partition() {
        let snapshot = reader(vec![
            partition("/dev/sdb1", "/mnt/usb", MountKind::Removable, Some(1 << 30)),
            partition("/dev/sdc1", "/mnt/locked", MountKind::Removable, None),
        ])
        .snapshot();

        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot.contains(&DeviceKey::new("/dev/sdc1", "/mnt/locked")));
    }

    #[test]
    fn enumeration_failure() {
        let reader = VolumeReader::new(FixedSource {
            partitions: Vec::new(),
            fail_enumeration: true,
        });
        assert!(matches!(
            reader.try_snapshot(),
            Err(VolumeError::Enumeration(_))
        ));
        assert!(reader.snapshot().is_empty());
    }
}
