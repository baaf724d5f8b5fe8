use crate::{
    dir_cursor::{self, DirCursor},
    viewer::{Viewer, ViewerError},
};
use eframe::egui::{self, Color32, UiBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod popups;
mod status_bar;
mod toolbar;

pub const BACKGROUND: Color32 = Color32::from_rgb(38, 38, 38);
const TITLE_BAR_HEIGHT: f32 = 32.0;
const STATUS_BAR_HEIGHT: f32 = 24.0;

pub struct App {
    state: State,
    viewer: Viewer,
    cursor: DirCursor,
}

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct State {
    /// sticky across dialog opens, cleared by next/prev and rotation
    pub fit_to_window: bool,

    /// where the open dialog starts, home directory when unset
    pub open_dir: Option<PathBuf>,

    /// image-dependent controls, follows successful loads rather than the viewer
    #[serde(skip)]
    pub controls_enabled: bool,

    #[serde(skip)]
    pub status: String,

    /// pending modal message
    #[serde(skip)]
    pub notification: Option<String>,

    #[serde(skip)]
    pub about_open: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            fit_to_window: false,
            open_dir: None,
            controls_enabled: false,
            status: String::new(),
            notification: None,
            about_open: false,
        }
    }
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.style_mut(|style| {
            eapp_utils::setup_text_size(style);
            style.animation_time = 0.11;
        });

        let state = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            State::default()
        };

        Self::from_state(state)
    }

    fn from_state(state: State) -> Self {
        Self {
            viewer: Viewer::new(state.fit_to_window),
            cursor: DirCursor::new(),
            state,
        }
    }

    pub fn open_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Open image")
            .add_filter("Images", &dir_cursor::SUPPORTED_EXTENSIONS);

        let start_dir = self
            .state
            .open_dir
            .clone()
            .filter(|dir| dir.is_dir())
            .or_else(dirs::home_dir);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.pick_file() {
            self.open_path(&path);
        }
    }

    /// Open `path` as if chosen in the file dialog: rebuild the cursor, keep fit mode
    pub fn open_path(&mut self, path: &Path) {
        self.cursor = DirCursor::from_image(path).unwrap_or_else(|err| {
            log::warn!("list siblings of '{}' fails: {err}", path.display());
            DirCursor::new()
        });
        self.state.open_dir = Some(self.cursor.dir().to_path_buf());

        self.load(path);
    }

    pub fn next_image(&mut self) {
        if let Some(path) = self.cursor.next() {
            self.navigate_to(&path);
        }
    }

    pub fn prev_image(&mut self) {
        if let Some(path) = self.cursor.prev() {
            self.navigate_to(&path);
        }
    }

    /// The cursor has already moved; a failed load doesn't move it back
    fn navigate_to(&mut self, path: &Path) {
        if self.load(path) {
            self.viewer.set_fit_to_window(false);
        }
    }

    fn load(&mut self, path: &Path) -> bool {
        match self.viewer.load(path) {
            Ok(()) => {
                self.state.status = status_bar::status_text(path).unwrap_or_else(|err| {
                    log::warn!("read metadata of '{}' fails: {err}", path.display());
                    path.display().to_string()
                });
                self.state.controls_enabled = true;
                true
            }
            Err(err) => {
                self.notify(err);
                false
            }
        }
    }

    pub fn rotate(&mut self, delta: i32) {
        self.viewer.set_fit_to_window(false);
        self.viewer.rotate(delta);
    }

    pub fn zoom_in(&mut self) {
        if !self.viewer.fit_to_window() {
            self.viewer.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if !self.viewer.fit_to_window() {
            self.viewer.zoom_out();
        }
    }

    pub fn toggle_fit_to_window(&mut self) {
        self.viewer
            .set_fit_to_window(!self.viewer.fit_to_window());
    }

    pub fn save_image(&mut self) {
        match self.viewer.save_to_disk() {
            Ok(path) => log::info!("image saved to '{}'", path.display()),
            Err(err) => self.notify(err),
        }
    }

    pub fn print(&mut self) {
        if let Err(err) = self.viewer.print() {
            self.notify(err);
        }
    }

    pub fn close(&mut self) {
        self.viewer.reset();
        self.state.status.clear();
        self.state.controls_enabled = false;
    }

    fn notify(&mut self, err: ViewerError) {
        if err.is_silent() {
            log::info!("save cancelled");
            return;
        }

        log::error!("{err}");
        self.state.notification = Some(err.to_string());
    }

    fn process_inputs(&mut self, ui: &mut egui::Ui) {
        if ui.memory(|mem| mem.focused().is_none()) && self.state.notification.is_none() {
            use egui::{Key, Modifiers};

            if ui.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::O)) {
                self.open_dialog();
            }

            if self.state.controls_enabled {
                if ui.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::S)) {
                    self.save_image();
                }

                if ui.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::P)) {
                    self.print();
                }

                if ui.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::W)) {
                    self.close();
                }

                if ui.input(|i| i.key_pressed(Key::ArrowLeft)) {
                    self.prev_image();
                }

                if ui.input(|i| i.key_pressed(Key::ArrowRight)) {
                    self.next_image();
                }

                if ui.input(|i| i.key_pressed(Key::Plus) || i.key_pressed(Key::Equals)) {
                    self.zoom_in();
                }

                if ui.input(|i| i.key_pressed(Key::Minus)) {
                    self.zoom_out();
                }

                if ui.input(|i| i.key_pressed(Key::L)) {
                    self.rotate(-90);
                }

                if ui.input(|i| i.key_pressed(Key::R)) {
                    self.rotate(90);
                }

                if ui.input(|i| i.key_pressed(Key::F)) {
                    self.toggle_fit_to_window();
                }
            }
        }

        let dropped = ui.input(|i| i.raw.dropped_files.first().and_then(|file| file.path.clone()));
        if let Some(path) = dropped {
            if path.is_file() {
                self.open_path(&path);
            } else {
                log::warn!("dropped '{}' is not a file", path.display());
            }
        }
    }
}

impl eframe::App for App {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.state.fit_to_window = self.viewer.fit_to_window();
        eframe::set_value(storage, eframe::APP_KEY, &self.state);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        eapp_utils::borderless::window_frame(ctx, Some(BACKGROUND)).show(ctx, |ui| {
            eapp_utils::borderless::handle_resize(ui);

            let app_rect = ui.max_rect();
            let title_bar_rect = {
                let mut rect = app_rect;
                rect.max.y = rect.min.y + TITLE_BAR_HEIGHT;
                rect
            };
            let status_bar_rect = {
                let mut rect = app_rect;
                rect.min.y = rect.max.y - STATUS_BAR_HEIGHT;
                rect
            };
            let canvas_rect = {
                let mut rect = app_rect;
                rect.min.y = title_bar_rect.max.y;
                rect.max.y = status_bar_rect.min.y;
                rect
            };

            ui.scope_builder(UiBuilder::new().max_rect(canvas_rect), |ui| {
                ui.set_clip_rect(canvas_rect);
                self.viewer.ui(ui);
            });

            eapp_utils::borderless::title_bar(ui, title_bar_rect, |ui| self.ui_toolbar(ui));
            self.ui_status_bar(ui, status_bar_rect);

            self.process_inputs(ui);
        });

        self.ui_notification(ctx);
        self.ui_about(ctx);
    }
}
