#![allow(dead_code)]

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

pub const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Uniform gray micrograph stand-in.
pub fn gray_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, GRAY)
}

/// Gray image with a black "instrument footer" below `footer_y`.
pub fn image_with_footer(width: u32, height: u32, footer_y: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, y| {
        if y >= footer_y {
            Rgba([0, 0, 0, 255])
        } else {
            GRAY
        }
    })
}

/// Each pixel encodes its own coordinates: `[x, y, 0, 255]` (mod 256).
pub fn coordinate_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255]))
}

/// Number of pixels exactly equal to `color`.
pub fn count_color(img: &RgbaImage, color: Rgba<u8>) -> usize {
    img.pixels().filter(|p| **p == color).count()
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of pixels equal to `color`.
pub fn bbox_of(img: &RgbaImage, color: Rgba<u8>) -> Option<(u32, u32, u32, u32)> {
    bbox_where(img, |_, _, p| p == color)
}

/// Bounding box of pixels matching `pred(x, y, pixel)`.
pub fn bbox_where(
    img: &RgbaImage,
    pred: impl Fn(u32, u32, Rgba<u8>) -> bool,
) -> Option<(u32, u32, u32, u32)> {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in img.enumerate_pixels() {
        if !pred(x, y, *p) {
            continue;
        }
        bbox = Some(match bbox {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bbox
}

/// PNG-encoded copy of `img`.
pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}
