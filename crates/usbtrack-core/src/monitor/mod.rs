/// Presence monitor — polls mounted volumes and records connect/disconnect
/// events.
///
/// Each tick takes a fresh [`DeviceSet`] from the [`VolumeReader`], diffs it
/// by identity against the last known set, appends one event per change to
/// the [`HistoryLog`], and keeps the new set as the baseline.
///
/// # Usage
///
/// ```ignore
/// let mut monitor = PresenceMonitor::new(VolumeReader::system(), HistoryLog::new());
/// monitor.start(Duration::from_secs(1))?;
/// // read monitor.history() from the UI thread
/// monitor.stop();
/// ```
///
/// # Cancellation
///
/// [`PresenceMonitor::stop`] raises the cancel flag and wakes the poll thread
/// out of its interval wait, then joins it. The flag is checked at the top of
/// every cycle and again before a finished snapshot is applied, so no event
/// is recorded once `stop()` has returned. Dropping the monitor stops it.
use crate::config::MonitorConfig;
use crate::history::HistoryLog;
use crate::model::{DeviceSet, EventKind, HistoryEvent};
use crate::platform::VolumeReader;
use chrono::Local;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What one poll tick changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Connected events appended.
    pub connected: usize,
    /// Disconnected events appended.
    pub disconnected: usize,
    /// True when the tick was abandoned (enumeration failed or the monitor
    /// was stopped mid-tick) and the baseline left untouched.
    pub skipped: bool,
}

impl TickSummary {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    /// Total events appended.
    pub fn events(&self) -> usize {
        self.connected + self.disconnected
    }
}

/// State shared between the owner and the poll thread.
struct Shared {
    reader: VolumeReader,
    last_known: Mutex<DeviceSet>,
    history: HistoryLog,
}

impl Shared {
    fn tick(&self, cancel: Option<&AtomicBool>) -> TickSummary {
        // Snapshot outside the lock; the OS call is the slow part.
        let current = match self.reader.try_snapshot() {
            Ok(set) => set,
            Err(e) => {
                warn!("Monitor: {e}; skipping tick");
                return TickSummary::skipped();
            }
        };

        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            return TickSummary::skipped();
        }

        let mut last_known = self.last_known.lock();
        let mut summary = TickSummary::default();

        for device in current.difference(&last_known) {
            debug!("Monitor: connected {} at {}", device.identifier, device.mount_point);
            self.history
                .append(HistoryEvent::new(EventKind::Connected, device, Local::now()));
            summary.connected += 1;
        }
        for device in last_known.difference(&current) {
            debug!("Monitor: disconnected {} from {}", device.identifier, device.mount_point);
            self.history
                .append(HistoryEvent::new(EventKind::Disconnected, device, Local::now()));
            summary.disconnected += 1;
        }

        *last_known = current;
        summary
    }
}

/// Handle to the running poll thread.
struct MonitorHandle {
    cancel: Arc<AtomicBool>,
    /// Dropping or sending on this wakes the thread out of its interval wait.
    wake: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Signal the poll thread to stop. Non-blocking.
    fn signal(&self) {
        self.cancel.store(true, Ordering::Relaxed);
        let _ = self.wake.try_send(());
    }

    /// Signal and wait for the poll thread to exit.
    fn shutdown(mut self) {
        self.signal();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Monitor: poll thread panicked");
            }
        }
    }
}

/// Watches mounted volumes and feeds a [`HistoryLog`].
pub struct PresenceMonitor {
    shared: Arc<Shared>,
    worker: Option<MonitorHandle>,
}

impl PresenceMonitor {
    /// Create a stopped monitor with an empty baseline.
    pub fn new(reader: VolumeReader, history: HistoryLog) -> Self {
        Self {
            shared: Arc::new(Shared {
                reader,
                last_known: Mutex::new(DeviceSet::new()),
                history,
            }),
            worker: None,
        }
    }

    /// Create a stopped monitor whose history honours `config.history_capacity`.
    pub fn from_config(reader: VolumeReader, config: &MonitorConfig) -> Self {
        let history = match config.history_capacity {
            Some(limit) => HistoryLog::with_capacity_limit(limit),
            None => HistoryLog::new(),
        };
        Self::new(reader, history)
    }

    /// The history this monitor appends to.
    pub fn history(&self) -> &HistoryLog {
        &self.shared.history
    }

    /// Copy of the current baseline.
    pub fn last_known(&self) -> DeviceSet {
        self.shared.last_known.lock().clone()
    }

    /// Whether the poll thread is running.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Run one poll-and-diff cycle on the calling thread.
    pub fn poll_tick(&self) -> TickSummary {
        self.shared.tick(None)
    }

    /// Read the mounted devices now and make them the new baseline.
    ///
    /// No history events are produced, however different the new set is;
    /// a manual refresh rebuilds the live view without touching history.
    /// If enumeration fails the baseline is kept and returned unchanged.
    pub fn current_snapshot(&self) -> DeviceSet {
        match self.shared.reader.try_snapshot() {
            Ok(current) => {
                *self.shared.last_known.lock() = current.clone();
                current
            }
            Err(e) => {
                warn!("Refresh: {e}; keeping last known devices");
                self.last_known()
            }
        }
    }

    /// Start polling every `interval` on a background thread.
    ///
    /// The first tick runs immediately. A monitor that is already running is
    /// stopped and restarted with the new interval.
    pub fn start(&mut self, interval: Duration) -> std::io::Result<()> {
        self.stop();

        let cancel = Arc::new(AtomicBool::new(false));
        let (wake_tx, wake_rx) = bounded::<()>(1);
        let shared = Arc::clone(&self.shared);
        let cancel_clone = Arc::clone(&cancel);

        let thread = std::thread::Builder::new()
            .name("usbtrack-monitor".to_owned())
            .spawn(move || run_monitor(shared, interval, cancel_clone, wake_rx))?;

        info!("Monitor: started, polling every {:?}", interval);
        self.worker = Some(MonitorHandle {
            cancel,
            wake: wake_tx,
            thread: Some(thread),
        });
        Ok(())
    }

    /// Stop the poll thread and wait for it to exit. No-op when stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.worker.take() {
            handle.shutdown();
            info!("Monitor: stopped");
        }
    }
}

impl Drop for PresenceMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Background thread ──────────────────────────────────────────────────────

fn run_monitor(
    shared: Arc<Shared>,
    interval: Duration,
    cancel: Arc<AtomicBool>,
    wake: Receiver<()>,
) {
    loop {
        if cancel.load(Ordering::Relaxed) {
            break;
        }

        let started = Instant::now();
        let summary = shared.tick(Some(&cancel));
        let elapsed = started.elapsed();
        if elapsed > interval {
            warn!(
                "Monitor: tick took {:?}, longer than the {:?} interval",
                elapsed, interval
            );
        }
        if summary.events() > 0 {
            debug!(
                "Monitor: +{} / -{} devices",
                summary.connected, summary.disconnected
            );
        }

        match wake.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("Monitor: poll thread exiting");
}
