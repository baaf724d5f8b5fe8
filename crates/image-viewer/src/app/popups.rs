use eframe::egui::{self, RichText};

impl super::App {
    pub fn ui_notification(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.notification.as_ref() else {
            return;
        };

        let mut acknowledged = false;
        let response = egui::Modal::new(egui::Id::new("notification_modal")).show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.heading("Error");
            ui.add_space(8.0);
            ui.label(message);
            ui.add_space(8.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    acknowledged = true;
                }
            });
        });

        if acknowledged || response.should_close() {
            self.state.notification = None;
        }
    }

    pub fn ui_about(&mut self, ctx: &egui::Context) {
        egui::Window::new("About")
            .open(&mut self.state.about_open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(RichText::new("image-viewer").heading().strong());
                ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(8.0);
                ui.label("Open, rotate, zoom and page through png, jpeg, bmp, tiff and gif images.");
                ui.add_space(8.0);

                egui::Grid::new("about_shortcuts_grid")
                    .num_columns(2)
                    .spacing([16.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for (keys, action) in [
                            ("Ctrl+O", "open"),
                            ("Ctrl+S", "save a copy"),
                            ("Ctrl+P", "print"),
                            ("Ctrl+W", "close"),
                            ("← / →", "previous / next image"),
                            ("+ / -", "zoom in / out"),
                            ("L / R", "rotate left / right"),
                            ("F", "fit to window"),
                            ("wheel, drag", "zoom at cursor, pan"),
                        ] {
                            ui.label(keys);
                            ui.label(action);
                            ui.end_row();
                        }
                    });
            });
    }
}
