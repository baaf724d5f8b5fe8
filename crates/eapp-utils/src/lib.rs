use eframe::egui;

pub mod borderless;
pub mod natordset;
pub mod widgets;

#[macro_export]
macro_rules! capture_error {
    ($i:ident => $handler:expr, $block_to_capture:expr) => {
        if let Err($i) = || -> ::core::result::Result<(), Box<dyn ::std::error::Error>> {
            $block_to_capture;
            Ok(())
        }() {
            $handler;
        }
    };
}

pub fn setup_text_size(style: &mut egui::Style) {
    use crate::egui::FontFamily::Proportional;
    use crate::egui::FontId;
    use crate::egui::TextStyle::*;
    style.text_styles = [
        (Heading, FontId::new(18.0, Proportional)),
        (Body, FontId::new(15.0, Proportional)),
        (Monospace, FontId::new(15.0, Proportional)),
        (Button, FontId::new(15.0, Proportional)),
        (Small, FontId::new(12.0, Proportional)),
    ]
    .into();
}

pub fn get_body_font_id(ui: &egui::Ui) -> egui::FontId {
    ui.style()
        .text_styles
        .get(&egui::TextStyle::Body)
        .cloned()
        .unwrap_or_else(|| egui::FontId::proportional(15.0))
}

/// Log to stdout (debug builds only) and to `log_filename` next to the executable
pub fn setup_loggers(log_filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    use simplelog::{Config, LevelFilter, WriteLogger};
    use std::fs::File;

    let log_path = std::env::current_exe()?
        .parent()
        .ok_or("executable has no parent directory")?
        .join(log_filename);

    #[cfg(debug_assertions)]
    {
        use simplelog::{CombinedLogger, SimpleLogger};
        CombinedLogger::init(vec![
            SimpleLogger::new(LevelFilter::Info, Config::default()),
            WriteLogger::new(LevelFilter::Warn, Config::default(), File::create(log_path)?),
        ])?;
    }

    #[cfg(not(debug_assertions))]
    WriteLogger::init(LevelFilter::Warn, Config::default(), File::create(log_path)?)?;

    Ok(())
}

/// Scale that makes `image_size` fit inside `available_size`, keeping aspect ratio
#[inline]
pub fn calculate_fit_scale(available_size: egui::Vec2, image_size: egui::Vec2) -> f32 {
    let width_scale = available_size.x / image_size.x;
    let height_scale = available_size.y / image_size.y;
    width_scale.min(height_scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    #[test]
    fn fit_scale_picks_the_tighter_axis() {
        assert_eq!(calculate_fit_scale(vec2(100.0, 50.0), vec2(40.0, 20.0)), 2.5);
        assert_eq!(calculate_fit_scale(vec2(50.0, 100.0), vec2(40.0, 20.0)), 1.25);
        assert_eq!(calculate_fit_scale(vec2(10.0, 10.0), vec2(100.0, 20.0)), 0.1);
    }

    #[test]
    fn capture_error_runs_handler_on_failure() {
        let mut captured = None;
        capture_error!(err => captured = Some(err.to_string()), {
            "x".parse::<i32>()?;
        });
        assert!(captured.is_some());

        let mut untouched = true;
        capture_error!(_err => untouched = false, {
            "1".parse::<i32>()?;
        });
        assert!(untouched);
    }
}
