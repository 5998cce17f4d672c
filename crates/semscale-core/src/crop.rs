//! Crop rectangle and inset editing.
//!
//! The rectangle is edited through four named insets (distance from an image
//! edge to the matching crop edge). Every edit holds the opposite edge fixed
//! and keeps the rectangle inside the image with at least
//! [`MIN_CROP_SIZE`] pixels on each side.

use std::fmt;
use std::str::FromStr;

use crate::consts::MIN_CROP_SIZE;
use crate::error::{Result, SemScaleError};

/// A rectangle in native image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One of the four crop edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// The full image dimension this edge's inset is measured against.
    pub fn dimension(self, image_w: u32, image_h: u32) -> u32 {
        match self {
            Edge::Top | Edge::Bottom => image_h,
            Edge::Left | Edge::Right => image_w,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => write!(f, "top"),
            Edge::Bottom => write!(f, "bottom"),
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Edge {
    type Err = SemScaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Edge::Top),
            "bottom" => Ok(Edge::Bottom),
            "left" => Ok(Edge::Left),
            "right" => Ok(Edge::Right),
            other => Err(SemScaleError::InvalidCrop(format!("unknown edge '{other}'"))),
        }
    }
}

/// How an inset value is shown and entered. Stored state is always pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InsetUnit {
    #[default]
    Pixels,
    Percent,
}

impl InsetUnit {
    pub const ALL: &[Self] = &[Self::Pixels, Self::Percent];
}

impl fmt::Display for InsetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsetUnit::Pixels => write!(f, "px"),
            InsetUnit::Percent => write!(f, "%"),
        }
    }
}

/// Parse a numeric form field. Anything that is not a finite number is 0.
pub fn parse_lenient(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn percent_to_pixels(percent: f64, dimension: u32) -> i64 {
    (percent / 100.0 * f64::from(dimension)).round() as i64
}

pub fn pixels_to_percent(pixels: u32, dimension: u32) -> f64 {
    if dimension == 0 {
        return 0.0;
    }
    f64::from(pixels) / f64::from(dimension) * 100.0
}

impl CropRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn full(image_w: u32, image_h: u32) -> Self {
        Self::new(0, 0, image_w, image_h)
    }

    /// Crop used when a new image is loaded.
    ///
    /// A positive suggested crop line keeps everything above it; zero means
    /// no suggestion and keeps the full height.
    pub fn initial(image_w: u32, image_h: u32, suggested_crop_y: u32) -> Self {
        let height = if suggested_crop_y > 0 {
            suggested_crop_y.clamp(MIN_CROP_SIZE.min(image_h), image_h)
        } else {
            image_h
        };
        Self::new(0, 0, image_w, height)
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Current inset in pixels for `edge`.
    pub fn inset(&self, edge: Edge, image_w: u32, image_h: u32) -> u32 {
        match edge {
            Edge::Top => self.y,
            Edge::Left => self.x,
            Edge::Bottom => image_h.saturating_sub(self.bottom()),
            Edge::Right => image_w.saturating_sub(self.right()),
        }
    }

    /// Current inset formatted for display: whole pixels, or a percentage
    /// with one decimal.
    pub fn inset_display(&self, edge: Edge, unit: InsetUnit, image_w: u32, image_h: u32) -> String {
        let px = self.inset(edge, image_w, image_h);
        match unit {
            InsetUnit::Pixels => px.to_string(),
            InsetUnit::Percent => {
                format!("{:.1}", pixels_to_percent(px, edge.dimension(image_w, image_h)))
            }
        }
    }

    /// Return a new rectangle with `edge` moved to `value` pixels from the
    /// matching image edge. The opposite edge does not move.
    pub fn with_inset(self, edge: Edge, value: i64, image_w: u32, image_h: u32) -> CropRect {
        let value = u32::try_from(value.max(0)).unwrap_or(u32::MAX);
        let mut next = self;
        match edge {
            Edge::Top => {
                let bottom = self.bottom();
                let y = value.min(bottom.saturating_sub(MIN_CROP_SIZE));
                next.y = y;
                next.height = bottom - y;
            }
            Edge::Bottom => {
                let available = image_h.saturating_sub(self.y).saturating_sub(value);
                next.height = available.max(MIN_CROP_SIZE);
            }
            Edge::Left => {
                let right = self.right();
                let x = value.min(right.saturating_sub(MIN_CROP_SIZE));
                next.x = x;
                next.width = right - x;
            }
            Edge::Right => {
                let available = image_w.saturating_sub(self.x).saturating_sub(value);
                next.width = available.max(MIN_CROP_SIZE);
            }
        }
        tracing::debug!(%edge, value, ?next, "crop inset edited");
        next
    }

    /// Apply a raw form-field value in the given unit.
    pub fn with_inset_input(
        self,
        edge: Edge,
        text: &str,
        unit: InsetUnit,
        image_w: u32,
        image_h: u32,
    ) -> CropRect {
        let raw = parse_lenient(text);
        let pixels = match unit {
            InsetUnit::Pixels => raw.round() as i64,
            InsetUnit::Percent => percent_to_pixels(raw, edge.dimension(image_w, image_h)),
        };
        self.with_inset(edge, pixels, image_w, image_h)
    }

    /// Check that the rect fits inside the source and meets the minimum size.
    pub fn validated(&self, src_w: u32, src_h: u32) -> Result<CropRect> {
        if self.width < MIN_CROP_SIZE || self.height < MIN_CROP_SIZE {
            return Err(SemScaleError::InvalidCrop(format!(
                "Crop {}x{} is smaller than the {MIN_CROP_SIZE}x{MIN_CROP_SIZE} minimum",
                self.width, self.height
            )));
        }

        if self.right() > src_w || self.bottom() > src_h {
            return Err(SemScaleError::InvalidCrop(format!(
                "Crop region ({},{} {}x{}) exceeds source dimensions ({src_w}x{src_h})",
                self.x, self.y, self.width, self.height
            )));
        }

        Ok(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 1000;
    const H: u32 = 800;

    fn assert_valid(c: &CropRect) {
        assert!(c.validated(W, H).is_ok(), "invalid crop: {c:?}");
    }

    #[test]
    fn initial_uses_suggested_line() {
        assert_eq!(CropRect::initial(W, H, 700), CropRect::new(0, 0, 1000, 700));
    }

    #[test]
    fn initial_without_suggestion_keeps_full_height() {
        assert_eq!(CropRect::initial(W, H, 0), CropRect::full(W, H));
    }

    #[test]
    fn initial_clamps_out_of_range_suggestion() {
        assert_eq!(CropRect::initial(W, H, 5000).height, H);
        assert_eq!(CropRect::initial(W, H, 3).height, MIN_CROP_SIZE);
    }

    #[test]
    fn top_edit_keeps_bottom_edge() {
        let c = CropRect::new(0, 0, W, 700).with_inset(Edge::Top, 100, W, H);
        assert_eq!(c, CropRect::new(0, 100, W, 600));
    }

    #[test]
    fn top_edit_clamps_to_minimum_height() {
        let c = CropRect::new(0, 0, W, 700).with_inset(Edge::Top, 5000, W, H);
        assert_eq!(c.y, 690);
        assert_eq!(c.height, MIN_CROP_SIZE);
        assert_eq!(c.bottom(), 700);
    }

    #[test]
    fn bottom_edit_keeps_top_edge() {
        let c = CropRect::new(0, 50, W, 700).with_inset(Edge::Bottom, 100, W, H);
        assert_eq!(c, CropRect::new(0, 50, W, 650));
        assert_eq!(c.inset(Edge::Bottom, W, H), 100);
    }

    #[test]
    fn right_edit_clamps_to_minimum_width() {
        let c = CropRect::full(W, H).with_inset(Edge::Right, 99_999, W, H);
        assert_eq!(c.width, MIN_CROP_SIZE);
        assert_valid(&c);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let c = CropRect::new(20, 20, 100, 100)
            .with_inset(Edge::Bottom, -50, W, H)
            .with_inset(Edge::Right, -50, W, H)
            .with_inset(Edge::Left, -50, W, H)
            .with_inset(Edge::Top, -50, W, H);
        assert_eq!(c, CropRect::full(W, H));
    }

    #[test]
    fn non_numeric_input_is_zero() {
        assert_eq!(parse_lenient("abc"), 0.0);
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("NaN"), 0.0);
        assert_eq!(parse_lenient(" 12.5 "), 12.5);

        let c = CropRect::new(0, 0, W, 700).with_inset_input(Edge::Bottom, "oops", InsetUnit::Pixels, W, H);
        assert_eq!(c.height, H);
    }

    #[test]
    fn percent_input_rounds_to_pixels() {
        let c = CropRect::full(W, H).with_inset_input(Edge::Bottom, "12.5", InsetUnit::Percent, W, H);
        assert_eq!(c.inset(Edge::Bottom, W, H), 100);
        assert_eq!(c.inset_display(Edge::Bottom, InsetUnit::Percent, W, H), "12.5");
    }

    #[test]
    fn edge_parses_case_insensitively() {
        assert_eq!("Top".parse::<Edge>().unwrap(), Edge::Top);
        assert_eq!("RIGHT".parse::<Edge>().unwrap(), Edge::Right);
        assert!("middle".parse::<Edge>().is_err());
    }

    #[test]
    fn validated_rejects_undersized_and_overflowing() {
        assert!(CropRect::new(0, 0, 5, 50).validated(W, H).is_err());
        assert!(CropRect::new(995, 0, 10, 10).validated(W, H).is_err());
        assert!(CropRect::new(990, 790, 10, 10).validated(W, H).is_ok());
    }
}
