//! Scale-bar settings, geometry and rasterization.
//!
//! Anchor convention: the corner `y` computed by [`layout_scale_bar`] is the
//! bar's bottom edge. The filled bar spans `[y - thickness, y]`, and the
//! label baseline sits [`LABEL_GAP_PX`] above the bar's top edge. Preview and
//! export both use this convention.

use std::fmt;
use std::str::FromStr;

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BAR_LENGTH, DEFAULT_BAR_PADDING, DEFAULT_BAR_THICKNESS, DEFAULT_BAR_UNIT,
    DEFAULT_LABEL_FONT_SIZE, LABEL_GAP_PX,
};
use crate::error::{Result, SemScaleError};
use crate::font::LabelFont;
use crate::geometry::Rect;

/// An RGBA color, written as `#rrggbb` or `#rrggbbaa` in config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b, 255])
    }

    pub fn to_pixel(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl FromStr for Color {
    type Err = SemScaleError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || SemScaleError::Config(format!("invalid color '{s}'"));
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color([channel(0)?, channel(2)?, channel(4)?, alpha]))
    }
}

impl TryFrom<String> for Color {
    type Error = SemScaleError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Corner of the reference rectangle the bar is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Corner {
    pub const ALL: &[Self] = &[
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopLeft => write!(f, "Top Left"),
            Self::TopRight => write!(f, "Top Right"),
            Self::BottomLeft => write!(f, "Bottom Left"),
            Self::BottomRight => write!(f, "Bottom Right"),
        }
    }
}

impl FromStr for Corner {
    type Err = SemScaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tl" | "top-left" => Ok(Self::TopLeft),
            "tr" | "top-right" => Ok(Self::TopRight),
            "bl" | "bottom-left" => Ok(Self::BottomLeft),
            "br" | "bottom-right" => Ok(Self::BottomRight),
            other => Err(SemScaleError::Config(format!("unknown corner '{other}'"))),
        }
    }
}

/// Appearance and size of the new scale bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleBarSettings {
    pub visible: bool,
    /// Physical length of the bar, in `length_unit`.
    pub length_value: f64,
    pub length_unit: String,
    pub bar_thickness_px: u32,
    pub label_font_size_px: f32,
    pub label_color: Color,
    pub bar_color: Color,
    pub corner: Corner,
    pub padding_px: u32,
}

impl Default for ScaleBarSettings {
    fn default() -> Self {
        Self {
            visible: true,
            length_value: DEFAULT_BAR_LENGTH,
            length_unit: DEFAULT_BAR_UNIT.to_string(),
            bar_thickness_px: DEFAULT_BAR_THICKNESS,
            label_font_size_px: DEFAULT_LABEL_FONT_SIZE,
            label_color: Color::WHITE,
            bar_color: Color::WHITE,
            corner: Corner::BottomRight,
            padding_px: DEFAULT_BAR_PADDING,
        }
    }
}

/// Computed placement of the bar and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBarLayout {
    /// Filled bar rectangle.
    pub bar: Rect,
    pub label: String,
    pub label_center_x: f32,
    pub label_baseline_y: f32,
}

/// `"{value} {unit}"`, with the shortest float formatting (`5`, `2.5`).
pub fn format_label(value: f64, unit: &str) -> String {
    format!("{value} {unit}")
}

/// Bar width in pixels, or `None` if it would not be a positive finite size.
pub fn bar_pixel_width(length_value: f64, pixels_per_unit: f64) -> Option<f32> {
    let width = length_value * pixels_per_unit;
    (pixels_per_unit > 0.0 && width.is_finite() && width > 0.0).then_some(width as f32)
}

/// Place the bar inside `reference`. Returns `None` when uncalibrated, so
/// neither bar nor label is drawn.
pub fn layout_scale_bar(
    settings: &ScaleBarSettings,
    pixels_per_unit: Option<f64>,
    reference: Rect,
) -> Option<ScaleBarLayout> {
    let width = bar_pixel_width(settings.length_value, pixels_per_unit?)?;
    let pad = settings.padding_px as f32;
    let font_size = settings.label_font_size_px;
    let thickness = settings.bar_thickness_px as f32;

    let (x, y) = match settings.corner {
        Corner::BottomRight => (reference.right() - width - pad, reference.bottom() - pad),
        Corner::BottomLeft => (reference.left() + pad, reference.bottom() - pad),
        Corner::TopRight => (
            reference.right() - width - pad,
            reference.top() + pad + font_size,
        ),
        Corner::TopLeft => (reference.left() + pad, reference.top() + pad + font_size),
    };

    let bar = Rect::new(x, y - thickness, width, thickness);
    Some(ScaleBarLayout {
        bar,
        label: format_label(settings.length_value, &settings.length_unit),
        label_center_x: bar.x + width / 2.0,
        label_baseline_y: bar.top() - LABEL_GAP_PX,
    })
}

/// Draw a computed bar and label. Anything outside `canvas` is clipped.
pub fn draw_scale_bar(
    canvas: &mut RgbaImage,
    layout: &ScaleBarLayout,
    settings: &ScaleBarSettings,
    font: Option<&LabelFont>,
) {
    if let Some((x, y, w, h)) = clip_to_canvas(&layout.bar, canvas.width(), canvas.height()) {
        let rect = imageproc::rect::Rect::at(x, y).of_size(w, h);
        draw_filled_rect_mut(canvas, rect, settings.bar_color.to_pixel());
    }

    match font {
        Some(font) => font.draw_centered(
            canvas,
            &layout.label,
            settings.label_font_size_px,
            layout.label_center_x,
            layout.label_baseline_y,
            settings.label_color,
        ),
        None => tracing::warn!(label = %layout.label, "no label font available; drawing bar only"),
    }
}

/// Pixel extent of `bar` inside a `width x height` canvas, clipped in float
/// space before any integer conversion.
fn clip_to_canvas(bar: &Rect, width: u32, height: u32) -> Option<(i32, i32, u32, u32)> {
    if ![bar.x, bar.y, bar.width, bar.height].iter().all(|v| v.is_finite()) {
        return None;
    }
    let x0 = bar.x.round().max(0.0);
    let y0 = bar.y.round().max(0.0);
    let x1 = (bar.x + bar.width.max(1.0)).round().min(width as f32);
    let y1 = bar.bottom().round().min(height as f32);
    if !(x1 > x0 && y1 > y0) {
        return None;
    }
    Some((x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(corner: Corner) -> ScaleBarSettings {
        ScaleBarSettings {
            length_value: 5.0,
            length_unit: "µm".into(),
            bar_thickness_px: 4,
            label_font_size_px: 20.0,
            padding_px: 10,
            corner,
            ..ScaleBarSettings::default()
        }
    }

    #[test]
    fn width_follows_calibration() {
        assert_eq!(bar_pixel_width(5.0, 5.0), Some(25.0));
        assert_eq!(bar_pixel_width(5.0, 0.0), None);
        assert_eq!(bar_pixel_width(0.0, 5.0), None);
        assert_eq!(bar_pixel_width(5.0, f64::INFINITY), None);
    }

    #[test]
    fn bottom_right_anchor() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        let l = layout_scale_bar(&settings(Corner::BottomRight), Some(5.0), r).unwrap();
        assert_eq!(l.bar, Rect::new(165.0, 86.0, 25.0, 4.0));
        assert_eq!(l.label, "5 µm");
        assert_eq!(l.label_center_x, 177.5);
        assert_eq!(l.label_baseline_y, 78.0);
    }

    #[test]
    fn top_left_anchor_includes_font_size() {
        let r = Rect::new(50.0, 40.0, 200.0, 100.0);
        let l = layout_scale_bar(&settings(Corner::TopLeft), Some(5.0), r).unwrap();
        // y = top + pad + font = 70, bar occupies [66, 70]
        assert_eq!(l.bar, Rect::new(60.0, 66.0, 25.0, 4.0));
    }

    #[test]
    fn uncalibrated_has_no_layout() {
        let r = Rect::from_size(100.0, 100.0);
        assert!(layout_scale_bar(&settings(Corner::TopRight), None, r).is_none());
    }

    #[test]
    fn label_uses_shortest_number_format() {
        assert_eq!(format_label(5.0, "nm"), "5 nm");
        assert_eq!(format_label(2.5, "µm"), "2.5 µm");
    }

    #[test]
    fn color_parses_and_prints_hex() {
        let c: Color = "#ff8000".parse().unwrap();
        assert_eq!(c, Color::rgb(255, 128, 0));
        assert_eq!(c.to_string(), "#ff8000");
        let c: Color = "00000080".parse().unwrap();
        assert_eq!(c.0[3], 128);
        assert!("#12".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn corner_parses_short_and_long_names() {
        assert_eq!("br".parse::<Corner>().unwrap(), Corner::BottomRight);
        assert_eq!("Top-Left".parse::<Corner>().unwrap(), Corner::TopLeft);
        assert!("middle".parse::<Corner>().is_err());
    }

    #[test]
    fn draw_clips_bar_outside_canvas() {
        let mut canvas = RgbaImage::new(20, 20);
        let layout = ScaleBarLayout {
            bar: Rect::new(-10.0, 15.0, 100.0, 10.0),
            label: "1 nm".into(),
            label_center_x: 40.0,
            label_baseline_y: 7.0,
        };
        draw_scale_bar(&mut canvas, &layout, &ScaleBarSettings::default(), None);
        assert_eq!(canvas.get_pixel(0, 19).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn clip_handles_bars_beyond_i32_range() {
        let bar = Rect::new(-4.0e9, 15.0, 8.0e9, 10.0);
        assert_eq!(clip_to_canvas(&bar, 20, 20), Some((0, 15, 20, 5)));
        let off_canvas = Rect::new(3.0e9, 0.0, 10.0, 4.0);
        assert_eq!(clip_to_canvas(&off_canvas, 20, 20), None);
        let nan = Rect::new(f32::NAN, 0.0, 10.0, 4.0);
        assert_eq!(clip_to_canvas(&nan, 20, 20), None);
    }
}
