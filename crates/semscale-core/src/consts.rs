/// Minimum crop width and height in native pixels.
pub const MIN_CROP_SIZE: u32 = 10;

/// Vertical gap between the scale-bar label baseline and the bar's top edge.
pub const LABEL_GAP_PX: f32 = 8.0;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// File name used for exported images.
pub const EXPORT_FILE_NAME: &str = "sem-processed.png";

/// Default diameter of the magnifier viewport in screen pixels.
pub const DEFAULT_MAGNIFIER_DIAMETER: u32 = 150;

/// Default magnifier zoom factor.
pub const DEFAULT_MAGNIFIER_ZOOM: f32 = 4.0;

/// Half-length of the magnifier crosshair arms.
pub const MAGNIFIER_CROSSHAIR_ARM: i32 = 10;

/// Alpha of the dark mask drawn outside the crop rectangle (0-255).
pub const DEFAULT_MASK_ALPHA: u8 = 153;

/// Dash and gap lengths of the crop border, in native pixels.
pub const DEFAULT_BORDER_DASH: u32 = 10;
pub const DEFAULT_BORDER_GAP: u32 = 5;

/// Radius of the calibration point markers.
pub const DEFAULT_MARKER_RADIUS: i32 = 5;

/// Stroke width of the crop border and calibration line.
pub const DEFAULT_LINE_WIDTH: u32 = 2;

/// Default scale-bar geometry.
pub const DEFAULT_BAR_THICKNESS: u32 = 8;
pub const DEFAULT_LABEL_FONT_SIZE: f32 = 24.0;
pub const DEFAULT_BAR_PADDING: u32 = 20;
pub const DEFAULT_BAR_LENGTH: f64 = 1.0;
pub const DEFAULT_BAR_UNIT: &str = "µm";

/// System font locations searched when no label font is configured.
pub const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
