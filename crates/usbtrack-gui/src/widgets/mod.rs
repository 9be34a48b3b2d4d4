/// UI widgets for USB Tracker.

pub mod status_bar;
pub mod toolbar;
