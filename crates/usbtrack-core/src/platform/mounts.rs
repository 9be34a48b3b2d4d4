/// Mounted-volume enumeration for Linux, macOS, and the BSDs via `sysinfo`.
///
/// `sysinfo` already drops pseudo filesystems (proc, sysfs, cgroup, ...).
/// Remaining mounts are classified from the removable flag and the
/// filesystem name.
use super::volumes::{Partition, VolumeSource};
use crate::error::{ProbeError, VolumeError};
use crate::model::MountKind;
use std::path::Path;
use sysinfo::Disks;

/// Filesystems served over the network.
const NETWORK_FILESYSTEMS: &[&str] = &[
    "nfs", "nfs4", "cifs", "smbfs", "smb3", "afs", "9p", "ceph", "sshfs", "fuse.sshfs",
];

/// Optical media filesystems.
const OPTICAL_FILESYSTEMS: &[&str] = &["iso9660", "udf", "cd9660"];

/// Host volumes as reported by `sysinfo`.
#[derive(Debug, Default)]
pub struct SystemVolumes;

impl SystemVolumes {
    pub fn new() -> Self {
        Self
    }
}

impl VolumeSource for SystemVolumes {
    fn partitions(&self) -> Result<Vec<Partition>, VolumeError> {
        let disks = Disks::new_with_refreshed_list();

        Ok(disks
            .iter()
            .map(|disk| {
                let fs = disk.file_system().to_string_lossy().to_lowercase();
                Partition {
                    device: disk.name().to_string_lossy().into_owned(),
                    mount_point: disk.mount_point().to_string_lossy().into_owned(),
                    kind: classify(&fs, disk.is_removable()),
                    total_hint: Some(disk.total_space()),
                }
            })
            .collect())
    }

    fn capacity(&self, partition: &Partition) -> Result<u64, ProbeError> {
        // The mount may have gone away or become unreadable since the list
        // was taken.
        std::fs::metadata(Path::new(&partition.mount_point)).map_err(|source| {
            ProbeError::Inaccessible {
                mount_point: partition.mount_point.clone(),
                source,
            }
        })?;

        partition.total_hint.ok_or_else(|| ProbeError::Os {
            mount_point: partition.mount_point.clone(),
            message: "no capacity reported".to_owned(),
        })
    }
}

fn classify(file_system: &str, removable: bool) -> MountKind {
    if NETWORK_FILESYSTEMS.contains(&file_system) {
        MountKind::Network
    } else if OPTICAL_FILESYSTEMS.contains(&file_system) {
        MountKind::CdRom
    } else if removable {
        MountKind::Removable
    } else {
        MountKind::Fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_filesystem_then_removable_flag() {
        assert_eq!(classify("nfs4", false), MountKind::Network);
        assert_eq!(classify("iso9660", true), MountKind::CdRom);
        assert_eq!(classify("vfat", true), MountKind::Removable);
        assert_eq!(classify("ext4", false), MountKind::Fixed);
    }

    #[test]
    fn vanished_mount_point_fails_probe() {
        let partition = Partition {
            device: "/dev/sdz1".to_owned(),
            mount_point: "/definitely/not/mounted/here".to_owned(),
            kind: MountKind::Removable,
            total_hint: Some(1024),
        };
        assert!(matches!(
            SystemVolumes::new().capacity(&partition),
            Err(ProbeError::Inaccessible { .. })
        ));
    }

    #[test]
    fn reachable_mount_point_reports_hint() {
        let dir = tempfile::tempdir().unwrap();
        let partition = Partition {
            device: "/dev/sdz1".to_owned(),
            mount_point: dir.path().to_string_lossy().into_owned(),
            kind: MountKind::Removable,
            total_hint: Some(4096),
        };
        assert_eq!(SystemVolumes::new().capacity(&partition).unwrap(), 4096);
    }
}
