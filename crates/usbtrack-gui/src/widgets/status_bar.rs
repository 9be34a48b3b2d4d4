/// Bottom status bar — monitor state and counters.
use crate::state::AppState;
use egui::Ui;
use usbtrack_core::model::size::format_count;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_warning = egui::Color32::from_rgb(0xfa, 0xb3, 0x87);
    let color_success = egui::Color32::from_rgb(0xa6, 0xe3, 0xa1);

    ui.horizontal(|ui| {
        if state.monitor.is_running() {
            ui.label(
                egui::RichText::new(format!(
                    "● Monitoring every {:.1}s",
                    state.config.poll_interval().as_secs_f64()
                ))
                .size(12.0)
                .color(color_success),
            );
        } else if let Some(ref err) = state.monitor_error {
            ui.label(
                egui::RichText::new(format!("Monitor failed to start: {err}"))
                    .size(12.0)
                    .color(color_warning),
            );
        } else {
            ui.label(
                egui::RichText::new("Monitor stopped")
                    .size(12.0)
                    .color(color_weak),
            );
        }

        ui.separator();

        ui.label(
            egui::RichText::new(format!(
                "{} devices",
                format_count(state.devices.len() as u64)
            ))
            .size(12.0)
            .color(color_normal),
        );

        ui.separator();

        ui.label(
            egui::RichText::new(format!(
                "{} events",
                format_count(state.history_total as u64)
            ))
            .size(12.0)
            .color(color_normal),
        );

        if let Some(ref path) = state.last_export {
            ui.separator();
            let shown = truncate_path(&path.to_string_lossy(), 60);
            ui.label(
                egui::RichText::new(format!("Last export: {shown}"))
                    .size(12.0)
                    .color(color_weak),
            );
        }
    });
}

/// Truncate a path string to fit within `max_len` characters,
/// replacing the middle with "..." if needed.
fn truncate_path(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max_len {
        return path.to_string();
    }
    let half = (max_len - 3) / 2;
    let head: String = chars[..half].iter().collect();
    let tail: String = chars[chars.len() - half..].iter().collect();
    format!("{head}...{tail}")
}
