/// Connection history records.
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

use super::device::Device;

/// Timestamp layout used in the history table and exported reports.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether a device appeared or went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    Connected,
    Disconnected,
}

impl EventKind {
    /// Label written to the history table and reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single connect/disconnect observation. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEvent {
    /// Wall-clock time the monitor noticed the change.
    pub timestamp: DateTime<Local>,
    pub kind: EventKind,
    /// OS device path of the volume.
    pub identifier: String,
    /// Mount point of the volume.
    pub mount_point: String,
}

impl HistoryEvent {
    pub fn new(kind: EventKind, device: &Device, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            kind,
            identifier: device.identifier.clone(),
            mount_point: device.mount_point.clone(),
        }
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn time_display(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }
}
