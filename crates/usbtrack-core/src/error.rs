/// Error types for USB Tracker core.
///
/// Only [`ExportError`] is meant to reach the user. Probe and enumeration
/// failures are absorbed by the volume reader and the poll loop.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A single partition's capacity could not be determined.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The mount point could not be reached (permission denied, unmounted
    /// between enumeration and probe, ...).
    #[error("mount point {mount_point} is not accessible: {source}")]
    Inaccessible {
        mount_point: String,
        #[source]
        source: io::Error,
    },
    /// The OS refused the capacity query.
    #[error("capacity query for {mount_point} failed: {message}")]
    Os {
        mount_point: String,
        message: String,
    },
}

/// The list of mounted partitions could not be read at all.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("volume enumeration failed: {0}")]
    Enumeration(String),
}

/// Writing a history report failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("could not write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loading a configuration file failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}
