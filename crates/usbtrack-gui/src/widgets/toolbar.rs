/// Top action bar -- refresh, clear, export, theme toggle, and branding.
use crate::state::AppState;
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("🔌 USB Tracker")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        if ui
            .button("🔄 Refresh")
            .on_hover_text("Re-read mounted volumes now")
            .clicked()
        {
            state.refresh_devices();
        }

        if ui
            .button("🗑 Clear History")
            .on_hover_text("Remove all recorded events")
            .clicked()
        {
            state.clear_history();
        }

        // Right-aligned controls.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About USB Tracker").clicked() {
                state.show_about = true;
            }

            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }

            ui.separator();

            if ui
                .button("📤 Export History")
                .on_hover_text(format!(
                    "Write the full history to {}",
                    state.config.reports_dir.display()
                ))
                .clicked()
            {
                // The outcome is reported through the notice dialog.
                let _ = state.export_history();
            }
        });
    });
}
