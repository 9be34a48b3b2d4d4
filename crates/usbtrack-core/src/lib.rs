/// USB Tracker Core — volume polling, presence diffing, and connection history.
///
/// This crate contains all business logic with zero UI dependencies.
/// Any frontend (the egui window, a CLI, a test harness) drives it through
/// [`monitor::PresenceMonitor`] and [`history::HistoryLog`].
///
/// # Modules
///
/// - [`model`] — Device, device set, history event, and size formatting.
/// - [`platform`] — Mounted-volume enumeration and capacity probing.
/// - [`monitor`] — Background poll loop that turns snapshots into events.
/// - [`history`] — Shared, append-only connection history.
/// - [`export`] — Tab-separated history reports.
/// - [`config`] — Runtime settings with JSON loading.
/// - [`error`] — Error types shared across the crate.
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod model;
pub mod monitor;
pub mod platform;

pub use config::MonitorConfig;
pub use error::{ConfigError, ExportError, ProbeError, VolumeError};
pub use history::HistoryLog;
pub use model::{Device, DeviceKey, DeviceSet, EventKind, HistoryEvent};
pub use monitor::{PresenceMonitor, TickSummary};
pub use platform::{MountKind, Partition, VolumeReader, VolumeSource};
