//! Zoomed, circular view of the image around the cursor.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAGNIFIER_DIAMETER, DEFAULT_MAGNIFIER_ZOOM, MAGNIFIER_CROSSHAIR_ARM};
use crate::geometry::Point;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnifierConfig {
    /// Viewport diameter in screen pixels.
    pub diameter: u32,
    /// Screen pixels per native pixel.
    pub zoom: f32,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            diameter: DEFAULT_MAGNIFIER_DIAMETER,
            zoom: DEFAULT_MAGNIFIER_ZOOM,
        }
    }
}

/// One rendered magnifier frame.
#[derive(Clone, Debug)]
pub struct MagnifierView {
    /// `diameter x diameter` RGBA; transparent outside the circle.
    pub image: RgbaImage,
    /// Cursor position in native pixels, e.g. `"x: 123, y: 456"`.
    pub readout: String,
    /// The native point the view is centered on.
    pub center: Point,
}

const CROSSHAIR: Rgba<u8> = Rgba([255, 0, 0, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

pub fn format_readout(p: Point) -> String {
    format!("x: {}, y: {}", p.x.round() as i64, p.y.round() as i64)
}

/// Sample a `diameter / zoom` native window around `center` and scale it up
/// to fill a `diameter`-sized circular viewport.
///
/// Samples that fall outside `image` are transparent.
pub fn magnify(image: &RgbaImage, center: Point, config: &MagnifierConfig) -> MagnifierView {
    let d = config.diameter.max(1);
    let zoom = if config.zoom.is_finite() && config.zoom > 0.0 {
        config.zoom
    } else {
        1.0
    };
    let radius = d as f32 / 2.0;
    let (iw, ih) = image.dimensions();

    let mut out = RgbaImage::from_pixel(d, d, TRANSPARENT);
    for (sx, sy, px) in out.enumerate_pixels_mut() {
        let dx = sx as f32 + 0.5 - radius;
        let dy = sy as f32 + 0.5 - radius;
        if dx * dx + dy * dy > radius * radius {
            continue;
        }
        let nx = (center.x + dx / zoom).floor();
        let ny = (center.y + dy / zoom).floor();
        if nx >= 0.0 && ny >= 0.0 && (nx as u32) < iw && (ny as u32) < ih {
            *px = *image.get_pixel(nx as u32, ny as u32);
        }
    }

    draw_crosshair(&mut out);

    MagnifierView {
        image: out,
        readout: format_readout(center),
        center,
    }
}

fn draw_crosshair(out: &mut RgbaImage) {
    let (w, h) = out.dimensions();
    let cx = (w / 2) as i32;
    let cy = (h / 2) as i32;
    for o in -MAGNIFIER_CROSSHAIR_ARM..=MAGNIFIER_CROSSHAIR_ARM {
        for (x, y) in [(cx + o, cy), (cx, cy + o)] {
            if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                out.put_pixel(x as u32, y as u32, CROSSHAIR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_rounds_to_integers() {
        assert_eq!(format_readout(Point::new(122.6, 455.9)), "x: 123, y: 456");
        assert_eq!(format_readout(Point::new(-0.4, 0.0)), "x: 0, y: 0");
    }

    #[test]
    fn non_positive_zoom_does_not_panic() {
        let img = RgbaImage::from_pixel(20, 20, Rgba([1, 2, 3, 255]));
        let cfg = MagnifierConfig { diameter: 30, zoom: 0.0 };
        let view = magnify(&img, Point::new(10.0, 10.0), &cfg);
        assert_eq!(view.image.dimensions(), (30, 30));
    }
}
