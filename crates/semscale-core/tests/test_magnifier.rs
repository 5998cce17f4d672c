use image::Rgba;

use semscale_core::geometry::Point;
use semscale_core::magnifier::{magnify, MagnifierConfig};

mod common;

fn config() -> MagnifierConfig {
    MagnifierConfig { diameter: 150, zoom: 4.0 }
}

#[test]
fn test_samples_zoomed_window() {
    let img = common::coordinate_image(200, 200);
    let view = magnify(&img, Point::new(50.0, 60.0), &config());
    assert_eq!(view.image.dimensions(), (150, 150));
    // 24.5 screen px right/down of center -> 6.125 native px
    assert_eq!(view.image.get_pixel(99, 99).0, [56, 66, 0, 255]);
    assert_eq!(view.readout, "x: 50, y: 60");
}

#[test]
fn test_outside_circle_is_transparent() {
    let img = common::gray_image(200, 200);
    let view = magnify(&img, Point::new(100.0, 100.0), &config());
    assert_eq!(view.image.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(view.image.get_pixel(149, 149).0, [0, 0, 0, 0]);
    assert_eq!(view.image.get_pixel(110, 110).0, common::GRAY.0);
}

#[test]
fn test_corner_cursor_blank_fills_outside_samples() {
    let img = common::gray_image(200, 200);
    let view = magnify(&img, Point::new(0.0, 0.0), &config());
    assert_eq!(view.image.dimensions(), (150, 150));
    // up-left of the cursor lies outside the image
    assert_eq!(view.image.get_pixel(40, 40).0, [0, 0, 0, 0]);
    // down-right is inside
    assert_eq!(view.image.get_pixel(110, 110).0, common::GRAY.0);
}

#[test]
fn test_cursor_far_outside_image() {
    let img = common::gray_image(50, 50);
    let view = magnify(&img, Point::new(-1000.0, 5000.0), &config());
    let gray = view.image.pixels().filter(|p| **p == common::GRAY).count();
    assert_eq!(gray, 0);
    assert_eq!(view.readout, "x: -1000, y: 5000");
}

#[test]
fn test_crosshair_marks_center() {
    let img = common::gray_image(200, 200);
    let view = magnify(&img, Point::new(100.0, 100.0), &config());
    let red = Rgba([255, 0, 0, 255]);
    assert_eq!(*view.image.get_pixel(75, 75), red);
    assert_eq!(*view.image.get_pixel(85, 75), red);
    assert_eq!(*view.image.get_pixel(75, 65), red);
}
