//! Contains widgets related utils

use eframe::egui::{self, Align2, Color32, CornerRadius, Sense, Vec2, Widget, WidgetText};

pub fn color_lerp(color1: Color32, color2: Color32, factor: f32) -> Color32 {
    fn u8_lerp(v1: u8, v2: u8, factor: f32) -> u8 {
        (v1 as f32 * (1.0 - factor) + v2 as f32 * factor) as u8
    }

    Color32::from_rgba_premultiplied(
        u8_lerp(color1.r(), color2.r(), factor),
        u8_lerp(color1.g(), color2.g(), factor),
        u8_lerp(color1.b(), color2.b(), factor),
        u8_lerp(color1.a(), color2.a(), factor),
    )
}

/// Just a button, with plain style
pub struct PlainButton {
    text: WidgetText,
    size: Vec2,
    corner_radius: CornerRadius,
    hover: Option<Color32>,
    selected: bool,
}

impl PlainButton {
    pub fn new(size: Vec2, text: impl Into<WidgetText>) -> Self {
        Self {
            text: text.into(),
            size,
            corner_radius: Default::default(),
            hover: None,
            selected: false,
        }
    }

    #[inline]
    pub fn corner_radius(mut self, corner_radius: impl Into<CornerRadius>) -> Self {
        self.corner_radius = corner_radius.into();
        self
    }

    #[inline]
    pub fn hover(mut self, hover: impl Into<Color32>) -> Self {
        self.hover = Some(hover.into());
        self
    }

    /// Keep the hover fill while `selected`, for toggle-like buttons
    #[inline]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for PlainButton {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let hovered = response.hovered() || self.selected;
            let factor = ui.ctx().animate_bool(response.id, hovered);

            let hover = self.hover.unwrap_or(ui.visuals().widgets.hovered.bg_fill);

            ui.painter()
                .rect_filled(rect, self.corner_radius, color_lerp(Color32::TRANSPARENT, hover, factor));

            let text_color = ui.style().visuals.text_color();
            let strong_text_color = ui.style().visuals.strong_text_color();
            let font_id = crate::get_body_font_id(ui);

            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.text.text(),
                font_id,
                color_lerp(text_color, strong_text_color, factor),
            );
        }

        response
    }
}
