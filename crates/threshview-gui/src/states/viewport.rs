use threshview_core::document::BgraBitmap;
use threshview_core::loader::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use threshview_core::scheduler::DocumentId;

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 20.0;

/// Pixel readout at the hovered position, taken from the displayed
/// threshold result (not the source buffers).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeSample {
    pub x: usize,
    pub y: usize,
    pub bgra: [u8; 4],
    pub luminance: u8,
}

/// Maps image-pixel space to view-local screen space.
///
/// `pan` is the view-space position of the image's top-left sample;
/// `scale` is the image-pixels to screen-pixels ratio. Only the
/// viewport's input handling and its reset mutate this state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub pan: egui::Vec2,
}

impl ViewTransform {
    /// Fit the image inside the view and center it.
    pub fn fit(view: egui::Vec2, image: egui::Vec2) -> Self {
        if image.x <= 0.0 || image.y <= 0.0 {
            return Self {
                scale: 1.0,
                pan: egui::Vec2::ZERO,
            };
        }
        let scale = (view.x / image.x)
            .min(view.y / image.y)
            .clamp(MIN_SCALE, MAX_SCALE);
        let pan = egui::vec2(
            (view.x - image.x * scale) / 2.0,
            (view.y - image.y * scale) / 2.0,
        );
        Self { scale, pan }
    }

    /// Multiply the scale by `delta`, keeping the image point under the
    /// pointer fixed.
    pub fn zoom_at(&mut self, pointer: egui::Vec2, delta: f32) {
        let new_scale = (self.scale * delta).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = new_scale / self.scale;
        self.pan = pointer - (pointer - self.pan) * ratio;
        self.scale = new_scale;
    }

    pub fn pan_by(&mut self, delta: egui::Vec2) {
        self.pan += delta;
    }

    /// View-space rectangle the whole bitmap maps to (no cropping).
    pub fn image_rect(&self, image: egui::Vec2) -> egui::Rect {
        egui::Rect::from_min_size(self.pan.to_pos2(), image * self.scale)
    }

    /// View-space point to continuous image coordinates.
    pub fn screen_to_image(&self, p: egui::Vec2) -> egui::Vec2 {
        (p - self.pan) / self.scale
    }

    /// Sample the displayed bitmap under a view-space point, or `None`
    /// outside the image.
    pub fn probe(&self, p: egui::Vec2, bitmap: &BgraBitmap) -> Option<ProbeSample> {
        let img = self.screen_to_image(p);
        let x = img.x.floor();
        let y = img.y.floor();
        if x < 0.0 || y < 0.0 {
            return None;
        }

        let (x, y) = (x as usize, y as usize);
        let bgra = bitmap.pixel(x, y)?;
        let [b, g, r, _] = bgra;
        let lum = (r as f32 * LUMINANCE_R + g as f32 * LUMINANCE_G + b as f32 * LUMINANCE_B)
            .round()
            .clamp(0.0, 255.0) as u8;

        Some(ProbeSample {
            x,
            y,
            bgra,
            luminance: lum,
        })
    }
}

/// Viewport display state for the currently viewed document.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Which document the texture was built from. Kept separate from
    /// `viewed_doc` because the texture refresh and the transform reset
    /// happen at different points in the frame.
    pub texture_doc: Option<DocumentId>,
    pub transform: Option<ViewTransform>,
    /// Which document the transform belongs to; switching documents
    /// resets the view.
    pub viewed_doc: Option<DocumentId>,
    pub last_view_size: egui::Vec2,
    pub probe: Option<ProbeSample>,
    pub dragging: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            texture_doc: None,
            transform: None,
            viewed_doc: None,
            last_view_size: egui::Vec2::ZERO,
            probe: None,
            dragging: false,
        }
    }
}
