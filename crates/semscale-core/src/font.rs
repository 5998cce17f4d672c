//! Label font loading and text rasterization.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::RgbaImage;
use imageproc::drawing::{draw_text_mut, text_size};

use crate::consts::FALLBACK_FONT_PATHS;
use crate::error::{Result, SemScaleError};
use crate::scalebar::Color;

/// DejaVu Sans, used when neither a configured nor a system font loads.
static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// A TTF/OTF font used for scale-bar labels.
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    source: Option<PathBuf>,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("source", &self.source)
            .finish()
    }
}

impl LabelFont {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| SemScaleError::Font(e.to_string()))?;
        Ok(Self { font, source: None })
    }

    /// The bundled font. Reports no `source` path.
    pub fn embedded() -> Result<Self> {
        let font =
            FontArc::try_from_slice(EMBEDDED_FONT).map_err(|e| SemScaleError::Font(e.to_string()))?;
        Ok(Self { font, source: None })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let mut font = Self::from_bytes(bytes)
            .map_err(|e| SemScaleError::Font(format!("{}: {e}", path.display())))?;
        font.source = Some(path.to_path_buf());
        Ok(font)
    }

    /// Load the configured font, falling back to well-known system fonts and
    /// finally to the bundled one.
    pub fn resolve(configured: Option<&Path>) -> Option<Self> {
        if let Some(path) = configured {
            match Self::load(path) {
                Ok(font) => return Some(font),
                Err(e) => tracing::warn!(path = %path.display(), "failed to load label font: {e}"),
            }
        }

        let system = FALLBACK_FONT_PATHS
            .iter()
            .map(Path::new)
            .filter(|p| p.is_file())
            .find_map(|p| Self::load(p).ok());
        if let Some(font) = system {
            tracing::debug!(source = ?font.source, "using system label font");
            return Some(font);
        }

        match Self::embedded() {
            Ok(font) => {
                tracing::debug!("using embedded label font");
                Some(font)
            }
            Err(e) => {
                tracing::warn!("embedded label font unusable; labels will be omitted: {e}");
                None
            }
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Advance width of `text` at `size` pixels.
    pub fn text_width(&self, text: &str, size: f32) -> u32 {
        text_size(PxScale::from(size), &self.font, text).0
    }

    /// Draw `text` horizontally centered on `center_x` with its baseline at
    /// `baseline_y`.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size: f32,
        center_x: f32,
        baseline_y: f32,
        color: Color,
    ) {
        if !(size > 0.0) || text.is_empty() {
            return;
        }
        let scale = PxScale::from(size);
        let ascent = self.font.as_scaled(scale).ascent();
        let width = self.text_width(text, size) as f32;
        let left = (center_x - width / 2.0).round();
        let top = (baseline_y - ascent).round();
        // Skip text entirely off the canvas; its origin may not fit in i32.
        let (cw, ch) = (canvas.width() as f32, canvas.height() as f32);
        let visible = left.is_finite()
            && top.is_finite()
            && left + width >= 0.0
            && left <= cw
            && top + size * 2.0 >= 0.0
            && top <= ch;
        if !visible {
            return;
        }
        let (x, top) = (left as i32, top as i32);
        draw_text_mut(canvas, color.to_pixel(), x, top, scale, &self.font, text);
    }
}
