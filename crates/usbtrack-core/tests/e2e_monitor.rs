/// End-to-end monitor integration tests.
///
/// These tests drive the real `PresenceMonitor`, `HistoryLog`, and report
/// writer against a scripted `VolumeSource`, so every code path from
/// snapshot to exported file runs exactly as in the application, minus the
/// operating system.
use parking_lot::Mutex;
use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};
use usbtrack_core::export::export_history;
use usbtrack_core::{
    DeviceKey, EventKind, HistoryLog, MountKind, Partition, PresenceMonitor, ProbeError,
    VolumeError, VolumeReader, VolumeSource,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// A volume source whose partition list can be swapped from the test body
/// while the poll thread is running.
#[derive(Clone, Default)]
struct SwitchableSource {
    current: Arc<Mutex<Vec<Partition>>>,
}

impl SwitchableSource {
    fn set(&self, partitions: Vec<Partition>) {
        *self.current.lock() = partitions;
    }
}

impl VolumeSource for SwitchableSource {
    fn partitions(&self) -> Result<Vec<Partition>, VolumeError> {
        Ok(self.current.lock().clone())
    }

    fn capacity(&self, partition: &Partition) -> Result<u64, ProbeError> {
        partition.total_hint.ok_or_else(|| ProbeError::Os {
            mount_point: partition.mount_point.clone(),
            message: "no size".to_owned(),
        })
    }
}

fn usb_stick() -> Partition {
    Partition {
        device: "/dev/sdb1".to_owned(),
        mount_point: "/mnt/usb".to_owned(),
        kind: MountKind::Removable,
        total_hint: Some(16 * 1024 * 1024 * 1024),
    }
}

fn new_monitor(source: &SwitchableSource) -> PresenceMonitor {
    PresenceMonitor::new(VolumeReader::new(source.clone()), HistoryLog::new())
}

/// Poll `cond` until it holds or 10 seconds pass.
fn wait_for(what: &str, mut cond: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !cond() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        std::thread::sleep(Duration::from_millis(5));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Plug in, leave it, unplug, export: two events and a three-line report.
#[test]
fn attach_hold_detach_then_export() {
    let source = SwitchableSource::default();
    let monitor = new_monitor(&source);

    source.set(vec![usb_stick()]);
    monitor.poll_tick();
    let history = monitor.history().all();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, EventKind::Connected);
    assert_eq!(history[0].identifier, "/dev/sdb1");
    assert_eq!(history[0].mount_point, "/mnt/usb");

    let device = monitor
        .last_known()
        .get(&DeviceKey::new("/dev/sdb1", "/mnt/usb"))
        .cloned()
        .expect("stick must be in the baseline");
    assert_eq!(device.capacity, "16.00 GB");

    monitor.poll_tick();
    assert_eq!(monitor.history().len(), 1, "unchanged set must be quiet");

    source.set(Vec::new());
    monitor.poll_tick();
    let history = monitor.history().all();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].kind, EventKind::Disconnected);
    assert_eq!(history[1].identifier, "/dev/sdb1");
    assert!(history[0].timestamp <= history[1].timestamp);

    let dir = tempfile::tempdir().unwrap();
    let report = export_history(dir.path(), &history, chrono::Local::now()).unwrap();
    let text = fs::read_to_string(report).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Time\tEvent\tDevice\tMount Point");
    assert_eq!(
        lines[1],
        format!("{}\tConnected\t/dev/sdb1\t/mnt/usb", history[0].time_display())
    );
    assert_eq!(
        lines[2],
        format!("{}\tDisconnected\t/dev/sdb1\t/mnt/usb", history[1].time_display())
    );
}

/// The background thread picks up changes on its own and stops cleanly.
#[test]
fn background_polling_tracks_changes() {
    let source = SwitchableSource::default();
    let mut monitor = new_monitor(&source);
    monitor.start(Duration::from_millis(10)).unwrap();

    source.set(vec![usb_stick()]);
    wait_for("connect event", || monitor.history().len() == 1);

    source.set(Vec::new());
    wait_for("disconnect event", || monitor.history().len() == 2);

    monitor.stop();
    let kinds: Vec<EventKind> = monitor.history().all().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EventKind::Connected, EventKind::Disconnected]);
}

/// Once `stop()` returns, further volume changes never reach the history.
#[test]
fn no_events_after_stop() {
    let source = SwitchableSource::default();
    let mut monitor = new_monitor(&source);
    monitor.start(Duration::from_millis(5)).unwrap();
    monitor.stop();

    let len_at_stop = monitor.history().len();
    source.set(vec![usb_stick()]);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(monitor.history().len(), len_at_stop);
}

/// History length only grows between clears, and earlier entries keep
/// their place while the poll thread is appending.
#[test]
fn history_grows_append_only_while_polling() {
    let source = SwitchableSource::default();
    let mut monitor = new_monitor(&source);
    monitor.start(Duration::from_millis(1)).unwrap();

    let mut previous = Vec::new();
    for round in 0..20 {
        if round % 2 == 0 {
            source.set(vec![usb_stick()]);
        } else {
            source.set(Vec::new());
        }
        std::thread::sleep(Duration::from_millis(5));

        let now = monitor.history().all();
        assert!(now.len() >= previous.len());
        assert_eq!(&now[..previous.len()], &previous[..]);
        previous = now;
    }
    monitor.stop();
}

/// Clearing from the consumer side while the poll thread appends leaves a
/// log that only contains whole, well-formed events.
#[test]
fn clear_during_polling() {
    let source = SwitchableSource::default();
    let mut monitor = new_monitor(&source);
    monitor.start(Duration::from_millis(1)).unwrap();

    for round in 0..50 {
        if round % 2 == 0 {
            source.set(vec![usb_stick()]);
        } else {
            source.set(Vec::new());
        }
        monitor.history().clear();
        for event in monitor.history().all() {
            assert_eq!(event.identifier, "/dev/sdb1");
        }
    }
    monitor.stop();
}

/// A manual refresh between ticks never writes history, however different
/// the set it returns.
#[test]
fn manual_refresh_keeps_history_clean() {
    let source = SwitchableSource::default();
    let monitor = new_monitor(&source);

    source.set(vec![usb_stick()]);
    let devices = monitor.current_snapshot();
    assert_eq!(devices.len(), 1);
    assert!(monitor.history().is_empty());

    monitor.poll_tick();
    assert!(monitor.history().is_empty(), "tick after refresh sees no change");
}

/// A configured retention cap keeps only the newest events.
#[test]
fn retention_cap_from_config() {
    let source = SwitchableSource::default();
    let config = usbtrack_core::MonitorConfig {
        history_capacity: Some(2),
        ..Default::default()
    };
    let monitor =
        PresenceMonitor::from_config(VolumeReader::new(source.clone()), &config);

    for _ in 0..3 {
        source.set(vec![usb_stick()]);
        monitor.poll_tick();
        source.set(Vec::new());
        monitor.poll_tick();
    }

    let kinds: Vec<EventKind> = monitor.history().all().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EventKind::Connected, EventKind::Disconnected]);
}
