use semscale_core::consts::MIN_CROP_SIZE;
use semscale_core::crop::{CropRect, Edge, InsetUnit};

const W: u32 = 1000;
const H: u32 = 800;

fn assert_in_bounds(c: &CropRect, w: u32, h: u32) {
    assert!(c.width >= MIN_CROP_SIZE, "width too small: {c:?}");
    assert!(c.height >= MIN_CROP_SIZE, "height too small: {c:?}");
    assert!(c.right() <= w, "right edge out of bounds: {c:?}");
    assert!(c.bottom() <= h, "bottom edge out of bounds: {c:?}");
}

#[test]
fn test_repeated_edits_stay_valid() {
    let values: [i64; 9] = [-500, -1, 0, 1, 9, 10, 395, 799, 5000];
    let mut crop = CropRect::full(W, H);
    for _ in 0..3 {
        for edge in Edge::ALL {
            for v in values {
                crop = crop.with_inset(edge, v, W, H);
                assert_in_bounds(&crop, W, H);
            }
        }
    }
}

#[test]
fn test_percent_edits_stay_valid() {
    let inputs = ["0", "12.5", "49.9", "50", "99", "100", "250", "-20", "abc", ""];
    let mut crop = CropRect::initial(W, H, 700);
    for edge in Edge::ALL {
        for text in inputs {
            crop = crop.with_inset_input(edge, text, InsetUnit::Percent, W, H);
            assert_in_bounds(&crop, W, H);
        }
    }
}

#[test]
fn test_small_image_edits_stay_valid() {
    let (w, h) = (12, 10);
    let mut crop = CropRect::full(w, h);
    for edge in Edge::ALL {
        for v in [0, 1, 2, 3, 100] {
            crop = crop.with_inset(edge, v, w, h);
            assert_in_bounds(&crop, w, h);
        }
    }
}

#[test]
fn test_bottom_inset_reads_back_in_pixels() {
    for v in [0u32, 1, 37, 100, 699, 790] {
        let crop = CropRect::full(W, H).with_inset(Edge::Bottom, v as i64, W, H);
        assert_eq!(crop.inset(Edge::Bottom, W, H), v);
    }
}

#[test]
fn test_bottom_inset_reads_back_in_percent() {
    for v in [0.0f64, 0.1, 3.3, 12.5, 33.3, 66.7, 98.7] {
        let crop = CropRect::full(W, H).with_inset_input(
            Edge::Bottom,
            &v.to_string(),
            InsetUnit::Percent,
            W,
            H,
        );
        let shown: f64 = crop
            .inset_display(Edge::Bottom, InsetUnit::Percent, W, H)
            .parse()
            .unwrap();
        assert!((shown - v).abs() <= 0.1 + 1e-9, "{v} read back as {shown}");
    }
}

#[test]
fn test_opposite_edge_is_fixed() {
    let start = CropRect::new(100, 50, 600, 500);
    let c = start.with_inset(Edge::Top, 200, W, H);
    assert_eq!(c.bottom(), start.bottom());
    let c = start.with_inset(Edge::Left, 300, W, H);
    assert_eq!(c.right(), start.right());
    let c = start.with_inset(Edge::Right, 100, W, H);
    assert_eq!(c.x, start.x);
    let c = start.with_inset(Edge::Bottom, 100, W, H);
    assert_eq!(c.y, start.y);
}

#[test]
fn test_initial_crop_from_suggestion() {
    assert_eq!(CropRect::initial(W, H, 700), CropRect::new(0, 0, W, 700));
    assert_eq!(CropRect::initial(W, H, 0), CropRect::new(0, 0, W, H));
}
