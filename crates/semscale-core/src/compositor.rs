//! Preview and export composition.
//!
//! Both entry points are pure: they read the current state and return a new
//! surface, so hosts can call them after every accepted edit.

use std::time::Instant;

use image::{imageops, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::consts::{
    DEFAULT_BORDER_DASH, DEFAULT_BORDER_GAP, DEFAULT_LINE_WIDTH, DEFAULT_MARKER_RADIUS,
    DEFAULT_MASK_ALPHA, PARALLEL_PIXEL_THRESHOLD,
};
use crate::crop::CropRect;
use crate::font::LabelFont;
use crate::geometry::{to_crop_relative, Point, Rect};
use crate::scalebar::{draw_scale_bar, layout_scale_bar, Color, ScaleBarLayout, ScaleBarSettings};
use crate::session::Mode;

/// Colors and sizes of the editing overlays (never exported).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Opacity of the dark mask outside the crop (0-255).
    pub mask_alpha: u8,
    pub border_color: Color,
    pub border_dash: u32,
    pub border_gap: u32,
    pub line_width: u32,
    pub marker_color: Color,
    pub marker_radius: i32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            mask_alpha: DEFAULT_MASK_ALPHA,
            border_color: Color::WHITE,
            border_dash: DEFAULT_BORDER_DASH,
            border_gap: DEFAULT_BORDER_GAP,
            line_width: DEFAULT_LINE_WIDTH,
            marker_color: Color::rgb(255, 64, 64),
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

/// Everything the live preview depends on.
pub struct PreviewInput<'a> {
    pub image: &'a RgbaImage,
    pub crop: CropRect,
    pub mode: Mode,
    pub calibration: &'a Calibration,
    pub settings: &'a ScaleBarSettings,
    pub style: &'a OverlayStyle,
    pub font: Option<&'a LabelFont>,
}

/// Everything the exported image depends on.
pub struct ExportInput<'a> {
    pub image: &'a RgbaImage,
    pub crop: CropRect,
    pub calibration: &'a Calibration,
    pub settings: &'a ScaleBarSettings,
    pub font: Option<&'a LabelFont>,
}

/// Full-size preview: image, mask, crop border, then either calibration
/// markers (calibrate mode) or the scale bar (edit mode).
pub fn render_preview(input: &PreviewInput<'_>) -> RgbaImage {
    let started = Instant::now();
    let mut canvas = input.image.clone();

    shade_outside(&mut canvas, &input.crop, input.style.mask_alpha);
    draw_dashed_border(&mut canvas, &input.crop, input.style);

    match input.mode {
        Mode::Calibrate => draw_calibration_markers(&mut canvas, input.calibration, input.style),
        Mode::Edit if input.settings.visible => {
            let layout = layout_scale_bar(
                input.settings,
                input.calibration.pixels_per_unit(),
                Rect::from(input.crop),
            );
            if let Some(layout) = layout {
                draw_scale_bar(&mut canvas, &layout, input.settings, input.font);
            }
        }
        Mode::Edit => {}
    }

    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        mode = %input.mode,
        "preview rendered"
    );
    canvas
}

/// Output image sized to the crop.
///
/// The bar is laid out against the crop in native space, exactly as the
/// preview does, then shifted into the output's crop-relative coordinates.
pub fn render_export(input: &ExportInput<'_>) -> RgbaImage {
    let c = input.crop;
    let mut canvas = imageops::crop_imm(input.image, c.x, c.y, c.width, c.height).to_image();

    if input.settings.visible {
        let layout =
            layout_scale_bar(input.settings, input.calibration.pixels_per_unit(), Rect::from(c));
        if let Some(layout) = layout {
            let layout = crop_relative_layout(layout, &c);
            draw_scale_bar(&mut canvas, &layout, input.settings, input.font);
        }
    }
    canvas
}

fn crop_relative_layout(layout: ScaleBarLayout, crop: &CropRect) -> ScaleBarLayout {
    let origin = to_crop_relative(Point::new(layout.bar.x, layout.bar.y), crop);
    let label = to_crop_relative(Point::new(layout.label_center_x, layout.label_baseline_y), crop);
    ScaleBarLayout {
        bar: Rect::new(origin.x, origin.y, layout.bar.width, layout.bar.height),
        label_center_x: label.x,
        label_baseline_y: label.y,
        ..layout
    }
}

/// Darken every pixel outside `crop` exactly once.
///
/// Rows above and below the crop are shaded in full (top and bottom bands);
/// rows inside the crop's vertical extent are shaded only left and right of
/// it, so corners are never covered twice.
pub fn shade_outside(canvas: &mut RgbaImage, crop: &CropRect, alpha: u8) {
    if alpha == 0 {
        return;
    }
    let (w, h) = canvas.dimensions();
    let row_len = w as usize * 4;
    if row_len == 0 {
        return;
    }
    let keep = 255 - u16::from(alpha);
    let left = crop.x.min(w) as usize;
    let right = crop.right().min(w) as usize;
    let (top, bottom) = (crop.y, crop.bottom());

    let shade_row = |y: usize, row: &mut [u8]| {
        let y = y as u32;
        if y < top || y >= bottom {
            darken(row, keep);
        } else {
            darken(&mut row[..left * 4], keep);
            darken(&mut row[right * 4..], keep);
        }
    };

    let raw: &mut [u8] = canvas;
    if (w as usize) * (h as usize) >= PARALLEL_PIXEL_THRESHOLD {
        raw.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| shade_row(y, row));
    } else {
        raw.chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| shade_row(y, row));
    }
}

fn darken(pixels: &mut [u8], keep: u16) {
    for px in pixels.chunks_exact_mut(4) {
        for channel in &mut px[..3] {
            *channel = ((u16::from(*channel) * keep + 127) / 255) as u8;
        }
    }
}

fn draw_dashed_border(canvas: &mut RgbaImage, crop: &CropRect, style: &OverlayStyle) {
    let lw = style.line_width;
    if lw == 0 || style.border_dash == 0 {
        return;
    }
    let color = style.border_color.to_pixel();
    let step = (style.border_dash + style.border_gap) as usize;
    let mut dash = |x: u32, y: u32, w: u32, h: u32| {
        if w > 0 && h > 0 {
            let rect = imageproc::rect::Rect::at(x as i32, y as i32).of_size(w, h);
            draw_filled_rect_mut(canvas, rect, color);
        }
    };

    let lw_h = lw.min(crop.height);
    let lw_w = lw.min(crop.width);
    for x in (crop.x..crop.right()).step_by(step) {
        let len = style.border_dash.min(crop.right() - x);
        dash(x, crop.y, len, lw_h);
        dash(x, crop.bottom() - lw_h, len, lw_h);
    }
    for y in (crop.y..crop.bottom()).step_by(step) {
        let len = style.border_dash.min(crop.bottom() - y);
        dash(crop.x, y, lw_w, len);
        dash(crop.right() - lw_w, y, lw_w, len);
    }
}

fn draw_calibration_markers(canvas: &mut RgbaImage, calibration: &Calibration, style: &OverlayStyle) {
    let color = style.marker_color.to_pixel();
    let points = &calibration.points;

    if let (Some(a), Some(b)) = (points.start(), points.end()) {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len = (dx * dx + dy * dy).sqrt();
        // Perpendicular offsets give the line its width.
        let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };
        let lw = style.line_width.max(1) as i32;
        for i in 0..lw {
            let o = i as f32 - (lw - 1) as f32 / 2.0;
            draw_line_segment_mut(
                canvas,
                (a.x + nx * o, a.y + ny * o),
                (b.x + nx * o, b.y + ny * o),
                color,
            );
        }
    }

    for p in [points.start(), points.end()].into_iter().flatten() {
        draw_filled_circle_mut(
            canvas,
            (p.x.round() as i32, p.y.round() as i32),
            style.marker_radius,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn shade_covers_each_outside_pixel_once() {
        let mut img = RgbaImage::from_pixel(40, 30, Rgba([200, 200, 200, 255]));
        let crop = CropRect::new(10, 5, 20, 15);
        shade_outside(&mut img, &crop, 128);

        let shaded = ((200u16 * 127 + 127) / 255) as u8;
        for (x, y, px) in img.enumerate_pixels() {
            let inside = x >= 10 && x < 30 && y >= 5 && y < 20;
            let expected = if inside { 200 } else { shaded };
            assert_eq!(px.0[0], expected, "pixel ({x},{y})");
            assert_eq!(px.0[3], 255);
        }
    }

    #[test]
    fn shade_with_full_image_crop_is_noop() {
        let mut img = RgbaImage::from_pixel(12, 12, Rgba([90, 90, 90, 255]));
        shade_outside(&mut img, &CropRect::full(12, 12), 200);
        assert!(img.pixels().all(|p| p.0 == [90, 90, 90, 255]));
    }

    #[test]
    fn crop_relative_layout_subtracts_crop_origin() {
        let crop = CropRect::new(40, 30, 200, 100);
        let layout = ScaleBarLayout {
            bar: Rect::new(215.0, 102.0, 25.0, 8.0),
            label: "5 nm".into(),
            label_center_x: 227.5,
            label_baseline_y: 94.0,
        };
        let shifted = crop_relative_layout(layout, &crop);
        assert_eq!(shifted.bar, Rect::new(175.0, 72.0, 25.0, 8.0));
        assert_eq!(shifted.label_center_x, 187.5);
        assert_eq!(shifted.label_baseline_y, 64.0);
        assert_eq!(shifted.label, "5 nm");
    }

    #[test]
    fn border_stays_inside_image_at_edges() {
        let mut img = RgbaImage::new(30, 30);
        draw_dashed_border(&mut img, &CropRect::full(30, 30), &OverlayStyle::default());
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(29, 29).0, [255, 255, 255, 255]);
    }
}
