/// Connected devices panel.
///
/// Shows the devices from the latest snapshot: device path, mount point,
/// and formatted capacity.
use crate::state::AppState;
use egui::Ui;
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 20.0;

/// Draw the connected devices table.
pub fn devices_panel(ui: &mut Ui, state: &AppState) {
    ui.label(
        egui::RichText::new("Connected USB Devices")
            .strong()
            .color(ui.visuals().hyperlink_color),
    );
    ui.separator();

    if state.devices.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("No mounted volumes found.")
                    .size(12.0)
                    .color(ui.visuals().weak_text_color()),
            );
        });
        return;
    }

    ui.push_id("devices_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(220.0).at_least(100.0))
            .column(Column::initial(260.0).at_least(100.0))
            .column(Column::remainder().at_least(80.0))
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("Device");
                });
                header.col(|ui| {
                    ui.strong("Mount Point");
                });
                header.col(|ui| {
                    ui.strong("Size");
                });
            })
            .body(|mut body| {
                for device in &state.devices {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(&device.identifier)
                                .on_hover_text(device.kind.label());
                        });
                        row.col(|ui| {
                            ui.label(&device.mount_point);
                        });
                        row.col(|ui| {
                            ui.label(&device.capacity);
                        });
                    });
                }
            });
    });
}
