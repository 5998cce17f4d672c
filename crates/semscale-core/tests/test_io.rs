use semscale_core::error::SemScaleError;
use semscale_core::io::{decode_image, default_export_path, load_image, read_image_info, save_png};

mod common;

#[test]
fn test_save_and_load_png() {
    let img = common::coordinate_image(64, 48);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.png");

    save_png(&img, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded, img);
}

#[test]
fn test_png_bytes_decode_back() {
    let img = common::image_with_footer(32, 32, 20);
    let bytes = common::png_bytes(&img);
    assert_eq!(&bytes[1..4], b"PNG");
    assert_eq!(decode_image(&bytes).unwrap(), img);
}

#[test]
fn test_tiny_image_is_rejected() {
    let bytes = common::png_bytes(&common::gray_image(8, 40));
    assert!(matches!(
        decode_image(&bytes),
        Err(SemScaleError::InvalidDimensions { width: 8, height: 40 })
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_image(&dir.path().join("nope.png")).is_err());
}

#[test]
fn test_export_name_convention() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.tif");
    assert_eq!(default_export_path(&input), dir.path().join("sem-processed.png"));
}

#[test]
fn test_image_info_reports_stored_color_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.png");
    image::GrayImage::new(20, 12).save(&path).unwrap();

    let info = read_image_info(&path).unwrap();
    assert_eq!((info.width, info.height), (20, 12));
    assert_eq!(info.color, image::ColorType::L8);
}
