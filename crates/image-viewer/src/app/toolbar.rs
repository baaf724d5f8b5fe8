use eapp_utils::widgets::PlainButton;
use eframe::egui::{self, vec2};

const BUTTON_WIDTH: f32 = 32.0;

impl super::App {
    pub fn ui_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing.x = 2.0;
        let height = ui.available_height();
        let button = |text: &str| PlainButton::new(vec2(BUTTON_WIDTH, height), text);

        ui.add_space(4.0);

        if ui.add(button("🗁")).on_hover_text("Open (Ctrl+O)").clicked() {
            self.open_dialog();
        }

        let enabled = self.state.controls_enabled;
        let fit = self.viewer.fit_to_window();

        ui.add_enabled_ui(enabled, |ui| {
            if ui.add(button("💾")).on_hover_text("Save (Ctrl+S)").clicked() {
                self.save_image();
            }

            if ui.add(button("🖶")).on_hover_text("Print (Ctrl+P)").clicked() {
                self.print();
            }

            ui.separator();

            if ui.add(button("⏴")).on_hover_text("Previous (←)").clicked() {
                self.prev_image();
            }

            if ui.add(button("⏵")).on_hover_text("Next (→)").clicked() {
                self.next_image();
            }

            ui.separator();

            if ui.add(button("⟲")).on_hover_text("Rotate left (L)").clicked() {
                self.rotate(-90);
            }

            if ui.add(button("⟳")).on_hover_text("Rotate right (R)").clicked() {
                self.rotate(90);
            }

            ui.add_enabled_ui(!fit, |ui| {
                if ui.add(button("➕")).on_hover_text("Zoom in (+)").clicked() {
                    self.zoom_in();
                }

                if ui.add(button("➖")).on_hover_text("Zoom out (-)").clicked() {
                    self.zoom_out();
                }

                if ui
                    .add(button("1:1"))
                    .on_hover_text("Reset zoom (double click)")
                    .clicked()
                {
                    self.viewer.reset_zoom();
                }
            });

            if ui
                .add(button("⛶").selected(fit))
                .on_hover_text("Fit to window (F)")
                .clicked()
            {
                self.toggle_fit_to_window();
            }

            ui.separator();

            if ui.add(button("🗙")).on_hover_text("Close image (Ctrl+W)").clicked() {
                self.close();
            }
        });

        if ui.add(button("ℹ")).on_hover_text("About").clicked() {
            self.state.about_open = !self.state.about_open;
        }
    }
}
