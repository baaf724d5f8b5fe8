use eframe::egui::{self, Align2, CursorIcon, FontId, Pos2, Rect, Sense, Vec2, vec2};
use image::{DynamicImage, ImageFormat, imageops::FilterType};
use std::path::{Path, PathBuf};

mod error;
mod print;
mod save;
mod view_state;

pub use error::ViewerError;
pub use view_state::{ViewState, ZOOM_FACTOR};

/// Decoded image plus the copy actually put on screen
pub struct LoadedImage {
    path: PathBuf,
    source: DynamicImage,
    /// smooth-scaled copy while fitting the window, natural size otherwise
    fitted: Option<DynamicImage>,
}

impl LoadedImage {
    fn new(path: PathBuf, source: DynamicImage) -> Self {
        Self {
            path,
            source,
            fitted: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display(&self) -> &DynamicImage {
        self.fitted.as_ref().unwrap_or(&self.source)
    }

    pub fn display_size(&self) -> Vec2 {
        let display = self.display();
        vec2(display.width() as f32, display.height() as f32)
    }

    pub fn natural_size(&self) -> Vec2 {
        vec2(self.source.width() as f32, self.source.height() as f32)
    }
}

/// The canvas: one image, its transform, and the texture mirroring it
pub struct Viewer {
    image: Option<LoadedImage>,
    view: ViewState,
    texture: Option<egui::TextureHandle>,
    texture_dirty: bool,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Viewer {
    pub fn new(fit_to_window: bool) -> Self {
        Self {
            image: None,
            view: ViewState::new(fit_to_window),
            texture: None,
            texture_dirty: false,
        }
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn fit_to_window(&self) -> bool {
        self.view.fit_to_window()
    }

    /// Replace the current image. The previous one is dropped before decoding,
    /// so a failure leaves the viewer empty.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), ViewerError> {
        let path = path.as_ref();
        self.reset();

        let source = decode(path).map_err(|source| ViewerError::Decode {
            path: path.to_owned(),
            source,
        })?;

        log::info!(
            "loaded '{}' ({}x{})",
            path.display(),
            source.width(),
            source.height()
        );

        self.image = Some(LoadedImage::new(path.to_owned(), source));
        self.view.mark_initialized();
        if self.view.fit_to_window() {
            self.apply_fit();
        }
        self.texture_dirty = true;

        Ok(())
    }

    /// Drop the image and every transform, keeping only the fit preference
    pub fn reset(&mut self) {
        if self.image.is_none() {
            return;
        }

        self.image = None;
        self.texture = None;
        self.texture_dirty = false;
        self.view.reset();
    }

    pub fn set_fit_to_window(&mut self, enabled: bool) {
        if self.view.fit_to_window() == enabled {
            return;
        }

        self.view.set_fit_to_window(enabled);
        if enabled {
            self.apply_fit();
        } else {
            self.restore_natural_size();
        }
    }

    pub fn rotate(&mut self, delta: i32) {
        if self.image.is_none() {
            return;
        }

        self.view.rotate(delta);
        if self.view.fit_to_window() {
            self.apply_fit();
        }
    }

    /// Zoom anchored at `anchor` (viewport center when `None`), free mode only
    pub fn zoom_at(&mut self, factor: f32, anchor: Option<Pos2>) -> bool {
        self.image.is_some() && self.view.zoom(factor, anchor)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(ZOOM_FACTOR, None)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(1.0 / ZOOM_FACTOR, None)
    }

    /// Back to 1:1 and centered, free mode only
    pub fn reset_zoom(&mut self) {
        if self.view.is_free() {
            self.view.reset_zoom();
        }
    }

    pub fn on_resize(&mut self, viewport: Rect) {
        if !self.view.set_viewport(viewport) || !self.view.is_initialized() {
            return;
        }

        if self.view.fit_to_window() {
            self.apply_fit();
        } else {
            self.view.recenter();
        }
    }

    pub fn on_wheel(&mut self, delta_y: f32, anchor: Option<Pos2>) -> bool {
        self.image.is_some() && self.view.on_wheel(delta_y, anchor)
    }

    /// Ask for a destination in the home directory and write the rotated copy there
    pub fn save_to_disk(&self) -> Result<PathBuf, ViewerError> {
        let image = self.image.as_ref().ok_or(ViewerError::NotLoaded)?;
        let format = save::target_format(&image.path);

        let mut dialog = rfd::FileDialog::new().add_filter(format.as_str(), &[format.as_str()]);
        if let Some(home) = dirs::home_dir() {
            dialog = dialog.set_directory(home);
        }
        if let Some(stem) = image.path.file_stem() {
            dialog = dialog.set_file_name(format!("{}.{format}", stem.to_string_lossy()));
        }

        let chosen = dialog.save_file().ok_or(ViewerError::SaveCancelled)?;
        let path = save::with_format_extension(chosen, &format);
        self.save_to(&path)?;

        Ok(path)
    }

    /// Encode the full-resolution image, rotation baked in, to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ViewerError> {
        let image = self.image.as_ref().ok_or(ViewerError::NotLoaded)?;

        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let format = ImageFormat::from_extension(&ext)
            .filter(|fmt| fmt.can_write())
            .ok_or(ViewerError::UnsupportedFormat(ext))?;

        let copy = save::rotated(&image.source, self.view.rotation());
        save::encode(&copy, path, format).map_err(|source| ViewerError::Encode {
            path: path.to_owned(),
            source,
        })?;

        log::info!("saved '{}' as {format:?}", path.display());
        Ok(())
    }

    /// Print what the canvas holds (display copy times free zoom, rotated), no-op when empty
    pub fn print(&self) -> Result<(), ViewerError> {
        let Some(page) = self.page() else {
            return Ok(());
        };

        print::print_image(&page)?;
        Ok(())
    }

    fn page(&self) -> Option<DynamicImage> {
        let image = self.image.as_ref()?;
        let display = image.display();
        let scale = self.view.scale();

        let scaled = if (scale - 1.0).abs() > f32::EPSILON {
            let width = (display.width() as f32 * scale).round().max(1.0) as u32;
            let height = (display.height() as f32 * scale).round().max(1.0) as u32;
            display.resize_exact(width, height, FilterType::Triangle)
        } else {
            display.clone()
        };

        Some(save::rotated(&scaled, self.view.rotation()))
    }

    fn apply_fit(&mut self) {
        let Some(image) = self.image.as_mut() else {
            return;
        };

        let bounds = self.view.fit_bounds();
        if bounds.x < 1.0 || bounds.y < 1.0 {
            // no viewport yet, the first resize fits it
            return;
        }

        let natural = image.natural_size();
        let scale = eapp_utils::calculate_fit_scale(bounds, natural);
        let width = (natural.x * scale).round().max(1.0) as u32;
        let height = (natural.y * scale).round().max(1.0) as u32;

        if image.display().width() != width || image.display().height() != height {
            image.fitted = Some(image.source.resize_exact(width, height, FilterType::Triangle));
            self.texture_dirty = true;
        }
    }

    fn restore_natural_size(&mut self) {
        if let Some(image) = self.image.as_mut() {
            if image.fitted.take().is_some() {
                self.texture_dirty = true;
            }
        }
        self.view.recenter();
    }

    fn update_texture(&mut self, ctx: &egui::Context) {
        if !self.texture_dirty {
            return;
        }
        self.texture_dirty = false;

        let Some(image) = self.image.as_ref() else {
            self.texture = None;
            return;
        };

        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        let display = image.display();
        let rgba = if display.width() > max_side || display.height() > max_side {
            display
                .resize(max_side, max_side, FilterType::Triangle)
                .to_rgba8()
        } else {
            display.to_rgba8()
        };

        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [rgba.width() as _, rgba.height() as _],
            rgba.as_flat_samples().as_slice(),
        );

        self.texture = Some(ctx.load_texture(
            "image-viewer-canvas",
            color_image,
            egui::TextureOptions::LINEAR,
        ));
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        self.on_resize(rect);

        let sense = if self.view.is_free() {
            Sense::click_and_drag()
        } else {
            Sense::hover()
        };
        let response = ui.allocate_rect(rect, sense);

        if response.dragged() {
            self.view.pan(response.drag_delta());
        }

        if response.hovered() {
            let delta_y = ui.input(|i| i.raw_scroll_delta.y);
            if delta_y != 0.0 {
                self.on_wheel(delta_y, response.hover_pos());
            }
        }

        if response.double_clicked() {
            self.reset_zoom();
        }

        if self.view.is_free() && (response.hovered() || response.dragged()) {
            ui.ctx().set_cursor_icon(if response.dragged() {
                CursorIcon::Grabbing
            } else {
                CursorIcon::Grab
            });
        }

        self.update_texture(ui.ctx());

        let (Some(image), Some(texture)) = (self.image.as_ref(), self.texture.as_ref()) else {
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                "image-viewer :)",
                FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return;
        };

        let image_rect = self.view.image_rect(image.display_size());
        egui::Image::from_texture(texture)
            .rotate(self.view.rotation_radians(), Vec2::splat(0.5))
            .paint_at(ui, image_rect);
    }
}

fn decode(path: &Path) -> image::ImageResult<DynamicImage> {
    image::io::Reader::open(path)?.with_guessed_format()?.decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        DynamicImage::new_rgb8(width, height).save(&path).unwrap();
        path
    }

    fn viewport(width: f32, height: f32) -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(width, height))
    }

    fn display_dims(viewer: &Viewer) -> (u32, u32) {
        let display = viewer.image().unwrap().display();
        (display.width(), display.height())
    }

    #[test]
    fn load_starts_at_natural_size_in_free_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 40, 20);

        let mut viewer = Viewer::new(false);
        viewer.on_resize(viewport(100.0, 50.0));
        viewer.load(&path).unwrap();

        assert!(viewer.is_loaded());
        assert!(viewer.view().is_free());
        assert_eq!(viewer.view().rotation(), 0);
        assert_eq!(display_dims(&viewer), (40, 20));
        assert_eq!(viewer.image().unwrap().path(), path.as_path());
    }

    #[test]
    fn failed_load_discards_previous_image() {
        let tmp = tempfile::tempdir().unwrap();
        let good = write_image(tmp.path(), "good.png", 4, 4);
        let broken = tmp.path().join("broken.png");
        std::fs::write(&broken, b"definitely not a png").unwrap();

        let mut viewer = Viewer::default();
        viewer.load(&good).unwrap();

        let err = viewer.load(&broken).unwrap_err();
        assert!(matches!(err, ViewerError::Decode { .. }));
        assert!(err.to_string().contains("broken.png"));
        assert!(!viewer.is_loaded());
        assert!(!viewer.view().is_initialized());
    }

    #[test]
    fn sticky_fit_is_applied_on_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 40, 20);

        let mut viewer = Viewer::new(true);
        viewer.on_resize(viewport(100.0, 50.0));
        viewer.load(&path).unwrap();

        assert!(viewer.fit_to_window());
        assert!(!viewer.view().is_free());
        assert_eq!(display_dims(&viewer), (100, 50));
    }

    #[test]
    fn fit_on_then_off_restores_natural_dimensions() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 40, 20);

        let mut viewer = Viewer::new(false);
        viewer.on_resize(viewport(100.0, 50.0));
        viewer.load(&path).unwrap();

        viewer.set_fit_to_window(true);
        assert_eq!(display_dims(&viewer), (100, 50));

        viewer.set_fit_to_window(false);
        assert_eq!(display_dims(&viewer), (40, 20));
        assert!(viewer.view().is_free());
    }

    #[test]
    fn fit_swaps_target_box_when_quarter_turned() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 40, 20);

        let mut viewer = Viewer::new(false);
        viewer.on_resize(viewport(100.0, 50.0));
        viewer.load(&path).unwrap();
        viewer.rotate(90);
        viewer.set_fit_to_window(true);

        // fits a 50x100 box before being turned on screen
        assert_eq!(display_dims(&viewer), (50, 25));
    }

    #[test]
    fn rotating_in_fit_mode_refits_against_the_swapped_box() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 40, 20);

        let mut viewer = Viewer::new(true);
        viewer.on_resize(viewport(100.0, 50.0));
        viewer.load(&path).unwrap();
        assert_eq!(display_dims(&viewer), (100, 50));

        viewer.rotate(90);
        assert!(viewer.fit_to_window());
        assert_eq!(display_dims(&viewer), (50, 25));

        viewer.rotate(90);
        assert_eq!(display_dims(&viewer), (100, 50));
    }

    #[test]
    fn resize_refits_in_fit_mode_and_recenters_in_free_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 40, 20);

        let mut viewer = Viewer::new(true);
        viewer.on_resize(viewport(100.0, 50.0));
        viewer.load(&path).unwrap();

        viewer.on_resize(viewport(200.0, 200.0));
        assert_eq!(display_dims(&viewer), (200, 100));

        viewer.set_fit_to_window(false);
        viewer.zoom_at(2.0, Some(pos2(10.0, 10.0)));
        let scale = viewer.view().scale();
        viewer.on_resize(viewport(300.0, 300.0));
        assert_eq!(viewer.view().scale(), scale);
        assert_eq!(viewer.view().offset(), Vec2::ZERO);
    }

    #[test]
    fn zoom_is_rejected_in_fit_mode_and_when_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 8, 8);

        let mut viewer = Viewer::new(true);
        assert!(!viewer.zoom_in());

        viewer.on_resize(viewport(64.0, 64.0));
        viewer.load(&path).unwrap();
        assert!(!viewer.zoom_in());
        assert!(!viewer.on_wheel(1.0, None));
        assert_eq!(viewer.view().scale(), 1.0);

        viewer.set_fit_to_window(false);
        assert!(viewer.zoom_in());
        assert!(viewer.zoom_out());
        assert!((viewer.view().scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rotate_is_ignored_when_empty() {
        let mut viewer = Viewer::default();
        viewer.rotate(90);
        assert_eq!(viewer.view().rotation(), 0);
    }

    #[test]
    fn reset_clears_everything_but_fit_preference() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 8, 8);

        let mut viewer = Viewer::new(true);
        viewer.on_resize(viewport(64.0, 64.0));
        viewer.load(&path).unwrap();
        viewer.rotate(-90);

        viewer.reset();
        assert!(!viewer.is_loaded());
        assert_eq!(viewer.view().rotation(), 0);
        assert!(viewer.fit_to_window());

        // second reset is a no-op
        viewer.reset();
        assert!(!viewer.is_loaded());
    }

    #[test]
    fn save_bakes_rotation_into_full_resolution_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 40, 20);

        let mut viewer = Viewer::new(true);
        viewer.on_resize(viewport(10.0, 10.0));
        viewer.load(&path).unwrap();
        viewer.rotate(90);

        let out = tmp.path().join("out.png");
        viewer.save_to(&out).unwrap();

        let saved = image::open(&out).unwrap();
        assert_eq!((saved.width(), saved.height()), (20, 40));
        // the source buffer itself stays untouched
        assert_eq!(viewer.image().unwrap().natural_size(), vec2(40.0, 20.0));
    }

    #[test]
    fn save_to_tiff_uses_tiff_encoder() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "image.tif", 6, 3);

        let mut viewer = Viewer::default();
        viewer.load(&path).unwrap();

        let format = save::target_format(&path);
        let out = save::with_format_extension(tmp.path().join("image.tif"), &format);
        assert_eq!(out.file_name().unwrap(), "image.tiff");

        viewer.save_to(&out).unwrap();
        let content = std::fs::read(&out).unwrap();
        assert_eq!(image::guess_format(&content).unwrap(), ImageFormat::Tiff);
    }

    #[test]
    fn save_rejects_unknown_extension_and_empty_viewer() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 4, 4);

        let mut viewer = Viewer::default();
        assert!(matches!(
            viewer.save_to(&tmp.path().join("x.png")),
            Err(ViewerError::NotLoaded)
        ));

        viewer.load(&path).unwrap();
        assert!(matches!(
            viewer.save_to(&tmp.path().join("x.unknown")),
            Err(ViewerError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn print_without_image_does_nothing() {
        assert!(Viewer::default().print().is_ok());
    }

    #[test]
    fn printed_page_follows_zoom_and_rotation() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_image(tmp.path(), "a.png", 40, 20);

        let mut viewer = Viewer::new(false);
        viewer.on_resize(viewport(100.0, 100.0));
        viewer.load(&path).unwrap();
        assert!(viewer.zoom_at(2.0, None));
        viewer.rotate(90);

        let page = viewer.page().unwrap();
        assert_eq!((page.width(), page.height()), (40, 80));
    }
}
