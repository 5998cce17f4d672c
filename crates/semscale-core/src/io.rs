use std::path::{Path, PathBuf};

use image::{ColorType, ImageFormat, RgbaImage};

use crate::consts::{EXPORT_FILE_NAME, MIN_CROP_SIZE};
use crate::error::{Result, SemScaleError};

/// Reject images too small to hold a minimum crop.
pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width < MIN_CROP_SIZE || height < MIN_CROP_SIZE {
        return Err(SemScaleError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Load any supported raster file as 8-bit RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?.to_rgba8();
    check_dimensions(img.width(), img.height())?;
    tracing::debug!(path = %path.display(), width = img.width(), height = img.height(), "image loaded");
    Ok(img)
}

/// Basic facts about an image file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Color type as stored in the file, before RGBA conversion.
    pub color: ColorType,
}

pub fn read_image_info(path: &Path) -> Result<ImageInfo> {
    let img = image::open(path)?;
    Ok(ImageInfo {
        width: img.width(),
        height: img.height(),
        color: img.color(),
    })
}

/// Decode an in-memory encoded image (format sniffed from the bytes).
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    check_dimensions(img.width(), img.height())?;
    Ok(img)
}

/// Save as PNG regardless of the path's extension.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    tracing::debug!(path = %path.display(), "png written");
    Ok(())
}

/// `sem-processed.png` next to the input file.
pub fn default_export_path(input: &Path) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(EXPORT_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME))
}
