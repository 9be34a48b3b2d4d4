/// Content panels for USB Tracker.

pub mod devices_panel;
pub mod history_panel;
