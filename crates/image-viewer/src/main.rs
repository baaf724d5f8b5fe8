#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

pub mod app;
pub mod dir_cursor;
pub mod viewer;

fn main() {
    if let Err(err) = eapp_utils::setup_loggers("image-viewer.log") {
        eprintln!("setup loggers fails: {err}");
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("image-viewer")
            .with_decorations(false)
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 360.0])
            .with_transparent(true)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        "image-viewer",
        options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)))),
    ) {
        log::error!("run native fails: {err}");
    }
}
