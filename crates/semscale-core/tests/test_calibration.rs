use approx::assert_relative_eq;

use semscale_core::calibration::{Calibration, CalibrationPoints};
use semscale_core::geometry::Point;
use semscale_core::scalebar::bar_pixel_width;

#[test]
fn test_three_four_five_triangle() {
    let mut cal = Calibration::new(10.0, "µm");
    cal.click(Point::new(0.0, 0.0));
    cal.click(Point::new(30.0, 40.0));
    assert_eq!(cal.pixel_distance(), 50.0);
}

#[test]
fn test_click_cycle_restarts_on_third_click() {
    let a = Point::new(10.0, 10.0);
    let b = Point::new(50.0, 10.0);
    let c = Point::new(70.0, 90.0);
    let points = CalibrationPoints::Empty.click(a).click(b).click(c);
    assert_eq!(points, CalibrationPoints::HasStart { start: c });
    assert_eq!(points.end(), None);
    assert_eq!(points.pixel_distance(), 0.0);
}

#[test]
fn test_bar_width_from_calibration() {
    let mut cal = Calibration::new(10.0, "µm");
    cal.click(Point::new(0.0, 0.0));
    cal.click(Point::new(30.0, 40.0));
    let ppu = cal.pixels_per_unit().unwrap();
    assert_relative_eq!(ppu, 5.0);
    assert_eq!(bar_pixel_width(5.0, ppu), Some(25.0));
}

#[test]
fn test_reset_keeps_known_distance_and_unit() {
    let mut cal = Calibration::new(2.5, "nm");
    cal.click(Point::new(1.0, 2.0));
    cal.click(Point::new(4.0, 6.0));
    cal.reset_points();
    assert_eq!(cal.pixel_distance(), 0.0);
    assert_eq!(cal.points, CalibrationPoints::Empty);
    assert_eq!(cal.known_distance, 2.5);
    assert_eq!(cal.unit, "nm");
}

#[test]
fn test_uncalibrated_ratios() {
    let mut cal = Calibration::default();
    assert_eq!(cal.pixels_per_unit(), None);
    cal.click(Point::new(0.0, 0.0));
    cal.click(Point::new(5.0, 0.0));
    // known distance still 0
    assert_eq!(cal.pixels_per_unit(), None);
    cal.known_distance = -1.0;
    assert_eq!(cal.pixels_per_unit(), None);
    cal.known_distance = 1.0;
    assert_eq!(cal.pixels_per_unit(), Some(5.0));
}
