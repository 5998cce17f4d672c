//! Two-click calibration of the pixel-to-physical-length ratio.

use crate::geometry::Point;

/// Reference points picked on the old scale bar.
///
/// Clicking cycles through the states: `Empty -> HasStart -> HasBoth`, and a
/// click in `HasBoth` restarts at `HasStart` with the new location.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum CalibrationPoints {
    #[default]
    Empty,
    HasStart {
        start: Point,
    },
    HasBoth {
        start: Point,
        end: Point,
        pixel_distance: f64,
    },
}

impl CalibrationPoints {
    /// Next state after a click at `p`.
    pub fn click(self, p: Point) -> Self {
        match self {
            Self::Empty => Self::HasStart { start: p },
            Self::HasStart { start } => Self::HasBoth {
                start,
                end: p,
                pixel_distance: start.distance_to(&p),
            },
            Self::HasBoth { .. } => Self::HasStart { start: p },
        }
    }

    pub fn start(&self) -> Option<Point> {
        match *self {
            Self::Empty => None,
            Self::HasStart { start } | Self::HasBoth { start, .. } => Some(start),
        }
    }

    pub fn end(&self) -> Option<Point> {
        match *self {
            Self::HasBoth { end, .. } => Some(end),
            _ => None,
        }
    }

    /// Cached distance between the two points; 0 until both are set.
    pub fn pixel_distance(&self) -> f64 {
        match *self {
            Self::HasBoth { pixel_distance, .. } => pixel_distance,
            _ => 0.0,
        }
    }
}

/// Measured pixel distance plus the real-world length it corresponds to.
#[derive(Clone, Debug, PartialEq)]
pub struct Calibration {
    pub points: CalibrationPoints,
    pub known_distance: f64,
    pub unit: String,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            points: CalibrationPoints::Empty,
            known_distance: 0.0,
            unit: String::new(),
        }
    }
}

impl Calibration {
    pub fn new(known_distance: f64, unit: impl Into<String>) -> Self {
        Self {
            points: CalibrationPoints::Empty,
            known_distance,
            unit: unit.into(),
        }
    }

    pub fn click(&mut self, p: Point) {
        let from = self.points;
        self.points = self.points.click(p);
        tracing::debug!(?from, to = ?self.points, "calibration click");
    }

    /// Clear both points. The known distance and unit are kept.
    pub fn reset_points(&mut self) {
        self.points = CalibrationPoints::Empty;
    }

    pub fn pixel_distance(&self) -> f64 {
        self.points.pixel_distance()
    }

    /// Pixels per physical unit, or `None` when uncalibrated.
    pub fn pixels_per_unit(&self) -> Option<f64> {
        let ratio = self.pixel_distance() / self.known_distance;
        (ratio.is_finite() && ratio > 0.0).then_some(ratio)
    }

    pub fn is_calibrated(&self) -> bool {
        self.pixels_per_unit().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_clicks_compute_distance() {
        let mut cal = Calibration::new(10.0, "µm");
        cal.click(Point::new(0.0, 0.0));
        assert_eq!(cal.pixel_distance(), 0.0);
        cal.click(Point::new(30.0, 40.0));
        assert_eq!(cal.pixel_distance(), 50.0);
        assert_eq!(cal.pixels_per_unit(), Some(5.0));
    }

    #[test]
    fn third_click_restarts() {
        let mut cal = Calibration::default();
        cal.click(Point::new(1.0, 1.0));
        cal.click(Point::new(2.0, 2.0));
        cal.click(Point::new(3.0, 3.0));
        assert_eq!(cal.points.start(), Some(Point::new(3.0, 3.0)));
        assert_eq!(cal.points.end(), None);
        assert_eq!(cal.pixel_distance(), 0.0);
    }

    #[test]
    fn zero_known_distance_is_uncalibrated() {
        let mut cal = Calibration::new(0.0, "nm");
        cal.click(Point::new(0.0, 0.0));
        cal.click(Point::new(10.0, 0.0));
        assert_eq!(cal.pixels_per_unit(), None);
        assert!(!cal.is_calibrated());
    }

    #[test]
    fn coincident_points_are_uncalibrated() {
        let mut cal = Calibration::new(5.0, "nm");
        cal.click(Point::new(4.0, 4.0));
        cal.click(Point::new(4.0, 4.0));
        assert_eq!(cal.pixels_per_unit(), None);
    }
}
