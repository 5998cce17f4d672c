//! Coordinate transforms between display space, native image pixels and
//! crop-relative space.

use crate::crop::CropRect;

/// A point in either display or native pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`, computed in f64.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

/// An axis-aligned rectangle with floating-point origin and size.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

impl From<CropRect> for Rect {
    fn from(c: CropRect) -> Self {
        Rect::new(c.x as f32, c.y as f32, c.width as f32, c.height as f32)
    }
}

/// Per-axis ratio of native pixels to display pixels.
///
/// A zero-sized display extent yields a zero scale on that axis.
pub fn display_scale(display: Rect, native_size: (u32, u32)) -> (f32, f32) {
    let sx = if display.width > 0.0 {
        native_size.0 as f32 / display.width
    } else {
        0.0
    };
    let sy = if display.height > 0.0 {
        native_size.1 as f32 / display.height
    } else {
        0.0
    };
    (sx, sy)
}

/// Convert a pointer position in display coordinates to native image pixels.
///
/// The result is not clamped; callers that need in-bounds coordinates clamp
/// themselves.
pub fn screen_to_native(screen: Point, display: Rect, native_size: (u32, u32)) -> Point {
    let (sx, sy) = display_scale(display, native_size);
    Point::new((screen.x - display.x) * sx, (screen.y - display.y) * sy)
}

/// Convert native image pixels back to display coordinates.
pub fn native_to_screen(native: Point, display: Rect, native_size: (u32, u32)) -> Point {
    let (w, h) = (native_size.0.max(1) as f32, native_size.1.max(1) as f32);
    Point::new(
        native.x / w * display.width + display.x,
        native.y / h * display.height + display.y,
    )
}

/// Native coordinates relative to the crop origin.
pub fn to_crop_relative(native: Point, crop: &CropRect) -> Point {
    Point::new(native.x - crop.x as f32, native.y - crop.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_to_native_handles_non_uniform_scaling() {
        // 1000x800 image shown at 500x200 with origin (10, 20)
        let display = Rect::new(10.0, 20.0, 500.0, 200.0);
        let p = screen_to_native(Point::new(260.0, 120.0), display, (1000, 800));
        assert_eq!(p, Point::new(500.0, 400.0));
    }

    #[test]
    fn screen_to_native_passes_out_of_bounds_through() {
        let display = Rect::new(0.0, 0.0, 100.0, 100.0);
        let p = screen_to_native(Point::new(-10.0, 150.0), display, (200, 200));
        assert_eq!(p, Point::new(-20.0, 300.0));
    }

    #[test]
    fn zero_sized_display_does_not_panic() {
        let display = Rect::new(5.0, 5.0, 0.0, 0.0);
        let p = screen_to_native(Point::new(50.0, 50.0), display, (200, 200));
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn native_to_screen_inverts_screen_to_native() {
        let display = Rect::new(30.0, 40.0, 640.0, 360.0);
        let native = Point::new(123.0, 456.0);
        let screen = native_to_screen(native, display, (1280, 960));
        let back = screen_to_native(screen, display, (1280, 960));
        assert!((back.x - native.x).abs() < 1e-3);
        assert!((back.y - native.y).abs() < 1e-3);
    }

    #[test]
    fn crop_relative_subtracts_origin() {
        let crop = CropRect {
            x: 10,
            y: 20,
            width: 100,
            height: 100,
        };
        assert_eq!(
            to_crop_relative(Point::new(15.0, 25.0), &crop),
            Point::new(5.0, 5.0)
        );
    }
}
