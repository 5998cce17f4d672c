use semscale_core::geometry::Point;

/// Rendered magnifier frame and the cursor it was rendered for.
pub struct MagnifierOverlay {
    pub texture: egui::TextureHandle,
    pub readout: String,
    pub center: Point,
}

/// Viewport display state.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Native image size.
    pub image_size: Option<[usize; 2]>,
    pub zoom: f32,
    pub pan_offset: egui::Vec2,
    /// Fit the image to the panel on the next paint.
    pub needs_fit: bool,
    pub magnifier: Option<MagnifierOverlay>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            image_size: None,
            zoom: 1.0,
            pan_offset: egui::Vec2::ZERO,
            needs_fit: true,
            magnifier: None,
        }
    }
}

impl ViewportState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
