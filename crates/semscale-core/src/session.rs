//! Editor stage machine and the single mutable editing session.

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::calibration::Calibration;
use crate::compositor::{render_export, render_preview, ExportInput, OverlayStyle, PreviewInput};
use crate::crop::{parse_lenient, CropRect, Edge, InsetUnit};
use crate::error::{Result, SemScaleError};
use crate::font::LabelFont;
use crate::geometry::Point;
use crate::io::check_dimensions;
use crate::magnifier::{magnify, MagnifierConfig, MagnifierView};
use crate::scalebar::ScaleBarSettings;
use crate::suggestion::Suggestion;

/// Which interactions and overlays are active while editing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Calibrate,
    Edit,
}

impl Mode {
    pub const ALL: &[Self] = &[Self::Calibrate, Self::Edit];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Calibrate => write!(f, "Calibrate"),
            Mode::Edit => write!(f, "Edit"),
        }
    }
}

/// State owned for the lifetime of one loaded image.
#[derive(Clone, Debug)]
pub struct EditorSession {
    image: Arc<RgbaImage>,
    pub crop: CropRect,
    pub calibration: Calibration,
    pub settings: ScaleBarSettings,
    pub mode: Mode,
    /// Last known cursor position in native pixels.
    pub cursor: Option<Point>,
}

impl EditorSession {
    /// Open a session on `image`, seeded from `suggestion`.
    ///
    /// `defaults` supplies the bar settings; a parsable scale text overrides
    /// the bar length and unit.
    pub fn new(image: Arc<RgbaImage>, suggestion: &Suggestion, defaults: ScaleBarSettings) -> Self {
        let (w, h) = image.dimensions();
        let crop = CropRect::initial(w, h, suggestion.suggested_crop_y);
        let mut calibration = Calibration::default();
        let mut settings = defaults;

        match suggestion.seed() {
            Some(seed) => {
                calibration.known_distance = seed.known_distance;
                calibration.unit = seed.unit.clone();
                settings.length_value = seed.bar_length;
                settings.length_unit = seed.unit;
            }
            None => {
                if let Some(text) = &suggestion.detected_scale_text {
                    tracing::warn!(text = %text, "could not parse detected scale text");
                }
            }
        }

        tracing::debug!(width = w, height = h, ?crop, "editor session opened");
        Self {
            image,
            crop,
            calibration,
            settings,
            mode: Mode::Calibrate,
            cursor: None,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "mode changed");
            self.mode = mode;
        }
    }

    /// Record a click at native coordinates. Returns whether it was used.
    pub fn click(&mut self, native: Point) -> bool {
        if self.mode != Mode::Calibrate {
            return false;
        }
        self.calibration.click(native);
        true
    }

    pub fn reset_calibration(&mut self) {
        self.calibration.reset_points();
    }

    pub fn set_known_distance_input(&mut self, text: &str) {
        self.calibration.known_distance = parse_lenient(text);
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.calibration.unit = unit.into();
    }

    /// Apply a crop inset form edit.
    pub fn edit_inset(&mut self, edge: Edge, text: &str, unit: InsetUnit) {
        let (w, h) = self.dimensions();
        self.crop = self.crop.with_inset_input(edge, text, unit, w, h);
    }

    pub fn inset_display(&self, edge: Edge, unit: InsetUnit) -> String {
        let (w, h) = self.dimensions();
        self.crop.inset_display(edge, unit, w, h)
    }

    pub fn hover(&mut self, native: Point) {
        self.cursor = Some(native);
    }

    pub fn leave(&mut self) {
        self.cursor = None;
    }

    pub fn can_export(&self) -> bool {
        self.calibration.is_calibrated()
    }

    pub fn preview(&self, style: &OverlayStyle, font: Option<&LabelFont>) -> RgbaImage {
        render_preview(&PreviewInput {
            image: &self.image,
            crop: self.crop,
            mode: self.mode,
            calibration: &self.calibration,
            settings: &self.settings,
            style,
            font,
        })
    }

    /// Magnifier frame at the cursor; only shown while calibrating.
    pub fn magnifier(&self, config: &MagnifierConfig) -> Option<MagnifierView> {
        match (self.mode, self.cursor) {
            (Mode::Calibrate, Some(p)) => Some(magnify(&self.image, p, config)),
            _ => None,
        }
    }

    pub fn export(&self, font: Option<&LabelFont>) -> Result<RgbaImage> {
        if !self.can_export() {
            return Err(SemScaleError::Uncalibrated);
        }
        let (w, h) = self.dimensions();
        let crop = self.crop.validated(w, h)?;
        Ok(render_export(&ExportInput {
            image: &self.image,
            crop,
            calibration: &self.calibration,
            settings: &self.settings,
            font,
        }))
    }
}

/// Top-level editor stage.
#[derive(Debug, Default)]
pub enum Stage {
    #[default]
    Upload,
    Analyzing { image: Arc<RgbaImage> },
    Editing(Box<EditorSession>),
}

/// Stamp tying an outstanding suggestion to the load that requested it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

/// Owns the stage and discards suggestion results from stale loads.
#[derive(Debug, Default)]
pub struct Editor {
    stage: Stage,
    generation: u64,
    defaults: ScaleBarSettings,
}

impl Editor {
    pub fn new(defaults: ScaleBarSettings) -> Self {
        Self {
            stage: Stage::Upload,
            generation: 0,
            defaults,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn session(&self) -> Option<&EditorSession> {
        match &self.stage {
            Stage::Editing(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut EditorSession> {
        match &mut self.stage {
            Stage::Editing(s) => Some(&mut **s),
            _ => None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.stage, Stage::Analyzing { .. })
    }

    pub fn set_defaults(&mut self, defaults: ScaleBarSettings) {
        self.defaults = defaults;
    }

    /// Start a new load. Any session or pending analysis is discarded.
    pub fn begin_analysis(&mut self, image: RgbaImage) -> Result<AnalysisTicket> {
        check_dimensions(image.width(), image.height())?;
        self.generation += 1;
        self.stage = Stage::Analyzing {
            image: Arc::new(image),
        };
        tracing::debug!(generation = self.generation, "analysis started");
        Ok(AnalysisTicket(self.generation))
    }

    /// Deliver a suggestion outcome. Returns `false` if the ticket is stale
    /// and the outcome was dropped.
    pub fn complete_analysis(&mut self, ticket: AnalysisTicket, outcome: Result<Suggestion>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, current = self.generation, "dropping stale suggestion");
            return false;
        }
        let image = match &self.stage {
            Stage::Analyzing { image } => Arc::clone(image),
            _ => {
                tracing::debug!("suggestion arrived outside analysis; ignoring");
                return false;
            }
        };
        let suggestion = crate::suggestion::resolve_suggestion(outcome);
        let session = EditorSession::new(image, &suggestion, self.defaults.clone());
        self.stage = Stage::Editing(Box::new(session));
        true
    }

    /// Discard everything and return to the upload stage.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.stage = Stage::Upload;
        tracing::debug!(generation = self.generation, "editor reset");
    }
}
