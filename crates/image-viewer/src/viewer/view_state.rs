use eframe::egui::{Pos2, Rect, Vec2, vec2};

/// Zoom-in step, zoom-out uses the reciprocal
pub const ZOOM_FACTOR: f32 = 1.15;

const MIN_SCALE: f32 = 0.01;
const MAX_SCALE: f32 = 100.0;

/// Transform state of the viewer surface.
///
/// `scale` and `offset` only apply in free mode, fit mode always draws the
/// fitted copy centered and unscaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    rotation: i32,
    fit_to_window: bool,
    initialized: bool,
    scale: f32,
    /// image center relative to the viewport center
    offset: Vec2,
    viewport: Rect,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation: 0,
            fit_to_window: false,
            initialized: false,
            scale: 1.0,
            offset: Vec2::ZERO,
            viewport: Rect::NOTHING,
        }
    }
}

impl ViewState {
    pub fn new(fit_to_window: bool) -> Self {
        Self {
            fit_to_window,
            ..Default::default()
        }
    }

    /// Back to an unloaded view, the fit preference and viewport survive
    pub fn reset(&mut self) {
        *self = Self {
            fit_to_window: self.fit_to_window,
            viewport: self.viewport,
            ..Default::default()
        };
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn rotation_radians(&self) -> f32 {
        (self.rotation as f32).to_radians()
    }

    /// Accumulate `delta` degrees, a full turn or more in either direction resets to 0
    pub fn rotate(&mut self, delta: i32) {
        self.rotation += delta;
        if self.rotation.abs() >= 360 {
            self.rotation = 0;
        }
    }

    /// Whether width and height are swapped on screen (±90 / ±270)
    pub fn is_quarter_turned(&self) -> bool {
        self.rotation % 180 != 0
    }

    pub fn fit_to_window(&self) -> bool {
        self.fit_to_window
    }

    /// Switching mode drops any free zoom and pan
    pub fn set_fit_to_window(&mut self, enabled: bool) {
        self.fit_to_window = enabled;
        self.reset_zoom();
    }

    pub fn is_free(&self) -> bool {
        self.initialized && !self.fit_to_window
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Returns whether the viewport actually changed
    pub fn set_viewport(&mut self, viewport: Rect) -> bool {
        if self.viewport == viewport {
            return false;
        }

        self.viewport = viewport;
        true
    }

    /// Box the fitted copy must fit in, in unrotated image space
    pub fn fit_bounds(&self) -> Vec2 {
        let size = if self.viewport.is_positive() {
            self.viewport.size()
        } else {
            Vec2::ZERO
        };

        if self.is_quarter_turned() {
            vec2(size.y, size.x)
        } else {
            size
        }
    }

    pub fn recenter(&mut self) {
        self.offset = Vec2::ZERO;
    }

    pub fn reset_zoom(&mut self) {
        self.scale = 1.0;
        self.offset = Vec2::ZERO;
    }

    /// Multiply the free scale by `factor`, keeping the point under `anchor`
    /// still (viewport center when `None`). Rejected outside free mode and
    /// when the result would leave `MIN_SCALE..=MAX_SCALE`, leaving the state untouched.
    pub fn zoom(&mut self, factor: f32, anchor: Option<Pos2>) -> bool {
        if !self.is_free() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }

        let scale = self.scale * factor;
        if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
            return false;
        }
        self.scale = scale;

        let anchor = match anchor {
            Some(pos) if self.viewport.is_positive() => pos - self.viewport.center(),
            _ => Vec2::ZERO,
        };
        self.offset = self.offset * factor - anchor * (factor - 1.0);

        true
    }

    /// Wheel up zooms in, wheel down zooms out, nothing in fit mode
    pub fn on_wheel(&mut self, delta_y: f32, anchor: Option<Pos2>) -> bool {
        if self.fit_to_window || delta_y == 0.0 {
            return false;
        }

        let factor = if delta_y > 0.0 {
            ZOOM_FACTOR
        } else {
            1.0 / ZOOM_FACTOR
        };
        self.zoom(factor, anchor)
    }

    pub fn pan(&mut self, delta: Vec2) {
        if self.is_free() {
            self.offset += delta;
        }
    }

    /// Screen rect of the unrotated image quad, given the displayed surface size
    pub fn image_rect(&self, display_size: Vec2) -> Rect {
        if self.fit_to_window {
            Rect::from_center_size(self.viewport.center(), display_size)
        } else {
            Rect::from_center_size(
                self.viewport.center() + self.offset,
                display_size * self.scale,
            )
        }
    }
}
