use std::io::Write;

use semscale_core::config::AppConfig;
use semscale_core::scalebar::{Color, Corner};

#[test]
fn test_load_full_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r##"
[scale_bar]
length_value = 2.0
length_unit = "nm"
corner = "bottom-left"
bar_color = "#101010"

[overlay]
mask_alpha = 100

[magnifier]
diameter = 200
zoom = 6.0

[font]
path = "/tmp/label.ttf"

[suggestion]
command = "analyze-sem"
args = ["--json"]
"##
    )
    .unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.scale_bar.length_value, 2.0);
    assert_eq!(config.scale_bar.length_unit, "nm");
    assert_eq!(config.scale_bar.corner, Corner::BottomLeft);
    assert_eq!(config.scale_bar.bar_color, Color::rgb(16, 16, 16));
    assert_eq!(config.overlay.mask_alpha, 100);
    assert_eq!(config.magnifier.diameter, 200);
    assert_eq!(config.suggestion.args, vec!["--json".to_string()]);
    assert_eq!(config.provider().name(), "analyze-sem");
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[scale_bar]\nbar_color = \"purple\"\n").unwrap();
    assert!(AppConfig::load(file.path()).is_err());
    assert_eq!(AppConfig::load_or_default(Some(file.path())), AppConfig::default());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    assert_eq!(AppConfig::load_or_default(Some(&path)), AppConfig::default());
    assert_eq!(AppConfig::load_or_default(None), AppConfig::default());
}

#[test]
fn test_default_config_serializes() {
    let text = AppConfig::default().to_toml().unwrap();
    assert!(text.contains("[scale_bar]"));
    assert!(text.contains("corner = \"bottom-right\""));
    assert!(text.contains("[magnifier]"));
}
