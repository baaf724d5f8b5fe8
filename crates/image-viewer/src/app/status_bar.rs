use chrono::{DateTime, Local};
use eframe::egui::{self, Align2, Color32, FontId};
use std::path::Path;

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

pub fn format_byte_size(bytes: u64) -> String {
    let (value, unit) = if bytes > GB {
        (bytes as f64 / GB as f64, "GB")
    } else if bytes > MB {
        (bytes as f64 / MB as f64, "MB")
    } else if bytes > KB {
        (bytes as f64 / KB as f64, "KB")
    } else {
        (bytes as f64, "B")
    };

    format!("{value:.2} {unit}")
}

/// `<path>   ~<size>   <d/M/yyyy hh:mm:ss>`
pub fn status_text(path: &Path) -> std::io::Result<String> {
    let meta = std::fs::metadata(path)?;
    let modified: DateTime<Local> = meta.modified()?.into();

    Ok(format!(
        "{}   ~{}   {}",
        path.display(),
        format_byte_size(meta.len()),
        modified.format("%-d/%-m/%Y %H:%M:%S")
    ))
}

impl super::App {
    pub fn ui_status_bar(&self, ui: &mut egui::Ui, rect: egui::Rect) {
        ui.painter().line_segment(
            [rect.left_top(), rect.right_top()],
            ui.visuals().widgets.noninteractive.bg_stroke,
        );

        if self.state.status.is_empty() {
            return;
        }

        ui.painter()
            .with_clip_rect(rect)
            .text(
                rect.left_center() + egui::vec2(8.0, 0.0),
                Align2::LEFT_CENTER,
                &self.state.status,
                FontId::proportional(13.0),
                Color32::from_gray(0xcc),
            );
    }
}
