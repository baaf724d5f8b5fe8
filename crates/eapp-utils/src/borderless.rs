//! Contains borderless application related utils

use crate::widgets::PlainButton;
use eframe::egui::{
    self, Color32, CornerRadius, CursorIcon, Id, ResizeDirection, Sense, UiBuilder,
    ViewportCommand, vec2,
};

const ICON_CLOSE: &str = "🗙";
const ICON_MAXIMIZE: &str = "🗖";
const ICON_RESTORE: &str = "🗗";
const ICON_MINIMIZE: &str = "🗕";

// https://github.com/emilk/egui/pull/3762
pub fn handle_resize(ui: &mut egui::Ui) -> bool {
    let Some(pos) = ui.input(|i| i.pointer.interact_pos()) else {
        return false;
    };

    let screen_rect = ui.ctx().screen_rect();

    // the outermost layer of the viewport, can't expand screen_rect to test the pointer
    const SNAP_DIST: f32 = 5.0;

    let east_snap = (screen_rect.right() - pos.x).abs() <= SNAP_DIST;
    let west_snap = !east_snap && (screen_rect.left() - pos.x).abs() <= SNAP_DIST;
    let south_snap = (screen_rect.bottom() - pos.y).abs() <= SNAP_DIST;
    let north_snap = !south_snap && (screen_rect.top() - pos.y).abs() <= SNAP_DIST;

    let possible_resize_direction = match (north_snap, east_snap, west_snap, south_snap) {
        (true, true, false, false) => Some(ResizeDirection::NorthEast),
        (false, true, false, true) => Some(ResizeDirection::SouthEast),
        (true, false, true, false) => Some(ResizeDirection::NorthWest),
        (false, false, true, true) => Some(ResizeDirection::SouthWest),
        (true, false, false, false) => Some(ResizeDirection::North),
        (false, true, false, false) => Some(ResizeDirection::East),
        (false, false, true, false) => Some(ResizeDirection::West),
        (false, false, false, true) => Some(ResizeDirection::South),
        _ => None,
    };

    let Some(resize_direction) = possible_resize_direction else {
        return false;
    };

    ui.output_mut(|o| o.cursor_icon = into_cursor_icon(resize_direction));

    let is_maximized = ui.input(|i| i.viewport().maximized.unwrap_or(false));
    if !is_maximized && ui.input(|i| i.pointer.primary_pressed()) {
        ui.ctx()
            .send_viewport_cmd(ViewportCommand::BeginResize(resize_direction));
        true
    } else {
        false
    }
}

fn into_cursor_icon(direction: ResizeDirection) -> CursorIcon {
    match direction {
        ResizeDirection::North => CursorIcon::ResizeNorth,
        ResizeDirection::South => CursorIcon::ResizeSouth,
        ResizeDirection::West => CursorIcon::ResizeWest,
        ResizeDirection::East => CursorIcon::ResizeEast,
        ResizeDirection::NorthEast => CursorIcon::ResizeNorthEast,
        ResizeDirection::SouthEast => CursorIcon::ResizeSouthEast,
        ResizeDirection::NorthWest => CursorIcon::ResizeNorthWest,
        ResizeDirection::SouthWest => CursorIcon::ResizeSouthWest,
    }
}

pub fn window_frame(
    ctx: &egui::Context,
    fill: Option<Color32>,
) -> egui::containers::panel::CentralPanel {
    let corner_radius = if !ctx.input(|i| i.viewport().fullscreen.unwrap_or(false)) {
        CornerRadius::same(8)
    } else {
        CornerRadius::ZERO
    };

    let frame = egui::Frame::new()
        .fill(fill.unwrap_or(ctx.style().visuals.window_fill()))
        .corner_radius(corner_radius)
        .stroke(ctx.style().visuals.widgets.noninteractive.bg_stroke);

    egui::containers::panel::CentralPanel::default().frame(frame)
}

pub fn title_bar_behavior(ui: &egui::Ui, title_bar_rect: egui::Rect) {
    let title_bar_response = ui.interact(title_bar_rect, Id::new("title_bar_behavior"), Sense::click());

    if title_bar_response.double_clicked() {
        let is_maximized = ui.input(|i| i.viewport().maximized.unwrap_or(false));
        ui.ctx()
            .send_viewport_cmd(ViewportCommand::Maximized(!is_maximized));
    }

    if title_bar_response.is_pointer_button_down_on() {
        ui.ctx().send_viewport_cmd(ViewportCommand::StartDrag);
    }
}

/// Draggable title bar, window buttons on the right, `add_contents` laid out from the left
pub fn title_bar(
    ui: &mut egui::Ui,
    title_bar_rect: egui::Rect,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    title_bar_behavior(ui, title_bar_rect);

    ui.painter().line_segment(
        [
            title_bar_rect.left_bottom() + vec2(1.0, 0.0),
            title_bar_rect.right_bottom() + vec2(-1.0, 0.0),
        ],
        ui.visuals().widgets.noninteractive.bg_stroke,
    );

    ui.scope_builder(UiBuilder::new().max_rect(title_bar_rect), |ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            close_maximize_minimize(
                ui,
                120.0,
                title_bar_rect.height() - 1.0,
                Color32::TRANSPARENT,
            );

            ui.set_clip_rect(title_bar_rect.with_max_x(title_bar_rect.right() - 120.0));

            ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                add_contents(ui)
            });
        });
    });
}

pub fn close_maximize_minimize(
    ui: &mut egui::Ui,
    width_total: f32,
    height: f32,
    fill_color: impl Into<Color32>,
) {
    if ui.input(|i| i.viewport().fullscreen.unwrap_or(false)) {
        return;
    }

    let width = width_total / 3.0;
    let new_button = |str: &str| PlainButton::new(vec2(width, height), str);
    let top_right = CornerRadius {
        ne: 8,
        ..CornerRadius::ZERO
    };

    ui.scope(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;

        let frame_rect = {
            let mut start = ui.cursor();
            start.set_left(start.right() - width_total);
            start.set_bottom(start.top() + height);
            start
        };

        ui.painter()
            .rect_filled(frame_rect, top_right, fill_color.into());

        if ui
            .add(
                new_button(ICON_CLOSE)
                    .corner_radius(top_right)
                    .hover(Color32::from_rgb(200, 5, 5)),
            )
            .clicked()
        {
            ui.ctx().send_viewport_cmd(ViewportCommand::Close);
        }

        let is_maximized = ui.input(|i| i.viewport().maximized.unwrap_or(false));
        let text = if is_maximized {
            ICON_RESTORE
        } else {
            ICON_MAXIMIZE
        };

        if ui.add(new_button(text)).clicked() {
            ui.ctx()
                .send_viewport_cmd(ViewportCommand::Maximized(!is_maximized));
        }

        if ui.add(new_button(ICON_MINIMIZE)).clicked() {
            ui.ctx().send_viewport_cmd(ViewportCommand::Minimized(true));
        }
    });
}
