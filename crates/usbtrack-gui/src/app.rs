/// Main `eframe::App` implementation for USB Tracker.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::{AppState, NoticeKind};
use crate::widgets;
use std::time::Duration;
use usbtrack_core::MonitorConfig;

/// How often the window repaints to pick up events from the poll thread.
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so the first
/// device snapshot is taken and the poll thread is running before the OS
/// window is created.
pub struct UsbTrackerState {
    pub(crate) inner: AppState,
}

impl UsbTrackerState {
    /// Take the initial snapshot and start polling.
    pub fn build(config: MonitorConfig) -> Self {
        let mut state = AppState::new(config);
        state.start_monitor();
        Self { inner: state }
    }
}

/// The USB Tracker application.
pub struct UsbTrackerApp {
    state: AppState,
}

impl UsbTrackerApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: UsbTrackerState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state: state.inner }
    }
}

impl eframe::App for UsbTrackerApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Pull monitor state ────────────────────────────────────────────
        self.state.sync();
        ctx.request_repaint_after(REPAINT_INTERVAL);

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Notice dialog ─────────────────────────────────────────────────
        if let Some(notice) = self.state.notice.clone() {
            let mut dismissed = false;
            egui::Window::new(notice.title.as_str())
                .id(egui::Id::new("notice_dialog"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    let color = match notice.kind {
                        NoticeKind::Info => ui.visuals().text_color(),
                        NoticeKind::Error => ui.visuals().error_fg_color,
                    };
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(&notice.message).color(color));
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            dismissed = true;
                        }
                    });
                });
            if dismissed {
                self.state.dismiss_notice();
            }
        }

        // ── About dialog ──────────────────────────────────────────────────
        let mut show_about = self.state.show_about;
        egui::Window::new("About USB Tracker")
            .open(&mut show_about)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([320.0, 0.0])
            .show(ctx, |ui| {
                let accent = ui.visuals().hyperlink_color;
                let muted = ui.visuals().weak_text_color();
                let normal = ui.visuals().text_color();

                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("🔌 USB Tracker")
                            .size(22.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .color(muted),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "Watches mounted volumes and records when\n\
                             they are connected and disconnected.",
                        )
                        .size(12.0)
                        .color(normal),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("Built with Rust & egui")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                });
            });
        self.state.show_about = show_about;

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Connected devices ─────────────────────────────────────────────
        egui::TopBottomPanel::top("devices_panel")
            .resizable(true)
            .default_height(220.0)
            .min_height(120.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                panels::devices_panel::devices_panel(ui, &self.state);
                ui.add_space(4.0);
            });

        // ── Connection history ────────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::history_panel::history_panel(ui, &self.state);
        });
    }
}
