/// Connection history panel.
///
/// Displays the most recent events (oldest at the top) with the newest row
/// kept in view as the poll thread appends.
use crate::state::AppState;
use egui::Ui;
use egui_extras::{Column, TableBuilder};
use usbtrack_core::EventKind;

const ROW_HEIGHT: f32 = 20.0;

/// Draw the connection history table.
pub fn history_panel(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("Connection History")
                .strong()
                .color(ui.visuals().hyperlink_color),
        );
        if state.history_total > state.history_view.len() {
            ui.separator();
            ui.label(
                egui::RichText::new(format!(
                    "showing last {} of {}",
                    state.history_view.len(),
                    state.history_total
                ))
                .size(11.0)
                .color(ui.visuals().weak_text_color()),
            );
        }
    });
    ui.separator();

    if state.history_view.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("No connection events yet.")
                    .size(12.0)
                    .color(ui.visuals().weak_text_color()),
            );
        });
        return;
    }

    let connected = egui::Color32::from_rgb(0xa6, 0xe3, 0xa1);
    let disconnected = egui::Color32::from_rgb(0xf3, 0x8b, 0xa8);

    ui.push_id("history_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .stick_to_bottom(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(150.0).at_least(120.0))
            .column(Column::initial(100.0).at_least(80.0))
            .column(Column::initial(200.0).at_least(100.0))
            .column(Column::remainder().at_least(100.0))
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("Time");
                });
                header.col(|ui| {
                    ui.strong("Event");
                });
                header.col(|ui| {
                    ui.strong("Device");
                });
                header.col(|ui| {
                    ui.strong("Mount Point");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, state.history_view.len(), |mut row| {
                    let event = &state.history_view[row.index()];
                    let color = match event.kind {
                        EventKind::Connected => connected,
                        EventKind::Disconnected => disconnected,
                    };
                    row.col(|ui| {
                        ui.label(event.time_display());
                    });
                    row.col(|ui| {
                        ui.label(egui::RichText::new(event.kind.label()).color(color));
                    });
                    row.col(|ui| {
                        ui.label(&event.identifier);
                    });
                    row.col(|ui| {
                        ui.label(&event.mount_point);
                    });
                });
            });
    });
}
