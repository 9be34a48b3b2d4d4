/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes. The presence
/// monitor runs on its own thread and writes into the shared `HistoryLog`;
/// `sync()` copies what the tables need once per frame so rendering never
/// holds the history lock.
use std::path::{Path, PathBuf};
use usbtrack_core::export;
use usbtrack_core::{
    Device, ExportError, HistoryEvent, MonitorConfig, PresenceMonitor, VolumeReader,
};

/// Severity of a notice dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.to_owned(),
            message: message.into(),
        }
    }

    fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_owned(),
            message: message.into(),
        }
    }
}

/// All application state.
pub struct AppState {
    // ── Monitor ────────────────────────────────────────
    pub monitor: PresenceMonitor,
    pub config: MonitorConfig,
    /// Error from the last attempt to start the poll thread.
    pub monitor_error: Option<String>,

    // ── Views ──────────────────────────────────────────
    /// Devices from the most recent snapshot, in table order.
    pub devices: Vec<Device>,
    /// The last `config.history_view_limit` events, oldest first.
    pub history_view: Vec<HistoryEvent>,
    /// Total events held in the history log.
    pub history_total: usize,
    pub last_export: Option<PathBuf>,

    // ── UI state ───────────────────────────────────────
    pub notice: Option<Notice>,
    pub show_about: bool,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl AppState {
    /// State backed by the host's mounted volumes.
    pub fn new(config: MonitorConfig) -> Self {
        Self::with_reader(VolumeReader::system(), config)
    }

    /// State backed by an arbitrary reader. The device table is filled
    /// from an initial snapshot; the monitor is not started.
    pub fn with_reader(reader: VolumeReader, config: MonitorConfig) -> Self {
        let monitor = PresenceMonitor::from_config(reader, &config);
        let mut state = Self {
            monitor,
            config,
            monitor_error: None,
            devices: Vec::new(),
            history_view: Vec::new(),
            history_total: 0,
            last_export: None,
            notice: None,
            show_about: false,
            dark_mode: true,
        };
        state.refresh_devices();
        state
    }

    /// Start the background poll thread at the configured interval.
    pub fn start_monitor(&mut self) {
        match self.monitor.start(self.config.poll_interval()) {
            Ok(()) => self.monitor_error = None,
            Err(e) => {
                tracing::error!("Could not start monitor thread: {e}");
                self.monitor_error = Some(e.to_string());
            }
        }
    }

    /// Stop the background poll thread and wait for it to exit.
    pub fn stop_monitor(&mut self) {
        self.monitor.stop();
    }

    /// Re-read mounted volumes now. Rebaselines the monitor without adding
    /// history.
    pub fn refresh_devices(&mut self) {
        self.devices = self.monitor.current_snapshot().iter().cloned().collect();
    }

    /// Pull the latest device set and history tail from the monitor.
    ///
    /// Called once per frame; returns `true` if anything visible changed.
    pub fn sync(&mut self) -> bool {
        let devices: Vec<Device> = self.monitor.last_known().iter().cloned().collect();
        let history = self
            .monitor
            .history()
            .snapshot_tail(self.config.history_view_limit);
        let total = self.monitor.history().len();

        let changed =
            devices != self.devices || history != self.history_view || total != self.history_total;
        self.devices = devices;
        self.history_view = history;
        self.history_total = total;
        changed
    }

    /// Empty the history log and confirm with a notice.
    pub fn clear_history(&mut self) {
        self.monitor.history().clear();
        self.history_view.clear();
        self.history_total = 0;
        self.notice = Some(Notice::info("Information", "History cleared successfully"));
    }

    /// Write the full history to a report in `config.reports_dir`.
    ///
    /// Success and failure are both surfaced as a notice; the history itself
    /// is never modified.
    pub fn export_history(&mut self) -> Result<PathBuf, ExportError> {
        let events = self.monitor.history().all();
        let result =
            export::export_history(&self.config.reports_dir, &events, chrono::Local::now());

        match &result {
            Ok(path) => {
                let shown = absolute(path);
                self.notice = Some(Notice::info(
                    "Export Successful",
                    format!("USB history exported to:\n{}", shown.display()),
                ));
                self.last_export = Some(shown);
            }
            Err(e) => {
                tracing::warn!("Export failed: {e}");
                self.notice = Some(Notice::error(
                    "Export Error",
                    format!("Failed to export history:\n{e}"),
                ));
            }
        }
        result
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

/// Resolve `path` against the working directory for display.
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
