use thiserror::Error;

#[derive(Error, Debug)]
pub enum SemScaleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("Scale bar is not calibrated")]
    Uncalibrated,

    #[error("Suggestion error: {0}")]
    Suggestion(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Font error: {0}")]
    Font(String),
}

pub type Result<T> = std::result::Result<T, SemScaleError>;
