/// Platform-specific functionality — mounted-volume enumeration and
/// capacity probing.
///
/// Windows reads logical drive roots through the Win32 API; every other
/// platform goes through `sysinfo`. Both sit behind [`VolumeSource`] so the
/// monitor can be driven by a scripted source in tests.
pub mod volumes;

#[cfg(not(windows))]
mod mounts;
#[cfg(windows)]
mod win;

#[cfg(not(windows))]
pub use mounts::SystemVolumes;
#[cfg(windows)]
pub use win::SystemVolumes;

pub use crate::model::device::MountKind;
pub use volumes::{Partition, VolumeReader, VolumeSource};
