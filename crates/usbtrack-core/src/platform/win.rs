/// Drive enumeration using the Windows API.
///
/// Lists logical drive roots, classifies each with `GetDriveTypeW`, and
/// reads total capacity with `GetDiskFreeSpaceExW`. The drive root doubles
/// as both device identifier and mount point, e.g. `E:\`.
use super::volumes::{Partition, VolumeSource};
use crate::error::{ProbeError, VolumeError};
use crate::model::MountKind;
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use windows::Win32::Storage::FileSystem::{
    GetDiskFreeSpaceExW, GetDriveTypeW, GetLogicalDriveStringsW,
};

// Drive type constants from the Windows API.
const DRIVE_REMOVABLE_VAL: u32 = 2;
const DRIVE_FIXED_VAL: u32 = 3;
const DRIVE_REMOTE_VAL: u32 = 4;
const DRIVE_CDROM_VAL: u32 = 5;

/// Host drives as reported by the Win32 API.
#[derive(Debug, Default)]
pub struct SystemVolumes;

impl SystemVolumes {
    pub fn new() -> Self {
        Self
    }
}

impl VolumeSource for SystemVolumes {
    fn partitions(&self) -> Result<Vec<Partition>, VolumeError> {
        // GetLogicalDriveStringsW returns null-separated drive root strings.
        let mut buffer = [0u16; 256];
        let len = unsafe { GetLogicalDriveStringsW(Some(&mut buffer)) };

        if len == 0 {
            return Err(VolumeError::Enumeration(
                "GetLogicalDriveStringsW returned 0".to_owned(),
            ));
        }

        let full = OsString::from_wide(&buffer[..(len as usize).min(buffer.len())]);
        let full_str = full.to_string_lossy();

        Ok(full_str
            .split('\0')
            .filter(|s| !s.is_empty())
            .map(|root| {
                let wide = to_wide(root);
                let raw_type = unsafe { GetDriveTypeW(windows::core::PCWSTR(wide.as_ptr())) };
                let kind = match raw_type {
                    DRIVE_FIXED_VAL => MountKind::Fixed,
                    DRIVE_REMOVABLE_VAL => MountKind::Removable,
                    DRIVE_REMOTE_VAL => MountKind::Network,
                    DRIVE_CDROM_VAL => MountKind::CdRom,
                    _ => MountKind::Unknown,
                };
                Partition {
                    device: root.to_owned(),
                    mount_point: root.to_owned(),
                    kind,
                    total_hint: None,
                }
            })
            .collect())
    }

    fn capacity(&self, partition: &Partition) -> Result<u64, ProbeError> {
        let wide = to_wide(&partition.mount_point);
        let mut total: u64 = 0;
        unsafe {
            GetDiskFreeSpaceExW(
                windows::core::PCWSTR(wide.as_ptr()),
                None,
                Some(&mut total as *mut u64),
                None,
            )
        }
        .map_err(|e| ProbeError::Os {
            mount_point: partition.mount_point.clone(),
            message: e.to_string(),
        })?;
        Ok(total)
    }
}

/// Null-terminated UTF-16 copy of `s`.
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
