/// Data model for USB Tracker.
///
/// Re-exports the device snapshot types, history events, and size helpers.
pub mod device;
pub mod event;
pub mod size;

pub use device::{Device, DeviceKey, DeviceSet, MountKind};
pub use event::{EventKind, HistoryEvent};
