//! USB Tracker — watches mounted volumes and keeps a connection history.
//!
//! Thin binary entry point. All logic lives in the `usbtrack-core`
//! and `usbtrack-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::Path;
use usbtrack_core::MonitorConfig;

/// Optional settings file, looked up in the working directory.
const CONFIG_FILE: &str = "usbtrack.json";

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("USB Tracker starting");

    let config = MonitorConfig::load_or_default(Path::new(CONFIG_FILE));

    // Take the first snapshot and start polling before the window opens so
    // the device table is populated on the first frame.
    let state = usbtrack_gui::UsbTrackerState::build(config);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("USB Tracker")
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "USB Tracker",
        options,
        Box::new(|cc| {
            Ok(Box::new(usbtrack_gui::UsbTrackerApp::with_state(
                cc, state,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    // Dropping the app stops the monitor and joins its poll thread.
    tracing::info!("USB Tracker exiting");
    Ok(())
}
