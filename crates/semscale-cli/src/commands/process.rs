use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use semscale_core::compositor::{render_export, ExportInput};
use semscale_core::crop::{Edge, InsetUnit};
use semscale_core::geometry::Point;
use semscale_core::io::{default_export_path, load_image, save_png};
use semscale_core::scalebar::{Color, Corner};
use semscale_core::session::{Editor, Mode};
use semscale_core::suggestion::{resolve_suggestion, Suggestion};

use super::{load_config, run_provider};
use crate::summary::print_process_summary;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input image file
    pub file: PathBuf,

    /// Output PNG (default: sem-processed.png next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the full-size preview composite
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ask the configured analyzer for a crop line and scale text
    #[arg(long)]
    pub suggest: bool,

    /// Keep everything above this row
    #[arg(long)]
    pub crop_y: Option<u32>,

    /// Old scale-bar text, e.g. "10 µm"
    #[arg(long)]
    pub scale_text: Option<String>,

    /// Top inset
    #[arg(long, allow_hyphen_values = true)]
    pub top: Option<f64>,

    /// Bottom inset
    #[arg(long, allow_hyphen_values = true)]
    pub bottom: Option<f64>,

    /// Left inset
    #[arg(long, allow_hyphen_values = true)]
    pub left: Option<f64>,

    /// Right inset
    #[arg(long, allow_hyphen_values = true)]
    pub right: Option<f64>,

    /// Interpret insets as percentages of the image dimension
    #[arg(long)]
    pub percent: bool,

    /// First calibration point on the old bar, as X,Y
    #[arg(long, value_parser = parse_point)]
    pub start: Option<Point>,

    /// Second calibration point on the old bar, as X,Y
    #[arg(long, value_parser = parse_point)]
    pub end: Option<Point>,

    /// Real-world length between the calibration points
    #[arg(long)]
    pub known: Option<f64>,

    /// Unit of the known length
    #[arg(long)]
    pub unit: Option<String>,

    /// Length of the new bar, in --unit
    #[arg(long)]
    pub length: Option<f64>,

    /// Bar corner: tl, tr, bl, br
    #[arg(long)]
    pub corner: Option<Corner>,

    /// Bar thickness in pixels
    #[arg(long)]
    pub thickness: Option<u32>,

    /// Label font size in pixels
    #[arg(long)]
    pub font_size: Option<f32>,

    /// Distance from the crop edge in pixels
    #[arg(long)]
    pub padding: Option<u32>,

    /// Bar color (#rrggbb or #rrggbbaa)
    #[arg(long)]
    pub bar_color: Option<Color>,

    /// Label color (#rrggbb or #rrggbbaa)
    #[arg(long)]
    pub label_color: Option<Color>,

    /// Export the crop without a scale bar
    #[arg(long)]
    pub no_bar: bool,
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate '{v}': {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

pub fn run(args: &ProcessArgs) -> Result<()> {
    let config = load_config(args.config.as_deref());
    let img = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let mut suggestion = if args.suggest {
        let provider = config.provider();
        resolve_suggestion(run_provider(provider.as_ref(), &args.file)?)
    } else {
        Suggestion::default()
    };
    if let Some(y) = args.crop_y {
        suggestion.suggested_crop_y = y;
    }
    if let Some(ref text) = args.scale_text {
        suggestion.detected_scale_text = Some(text.clone());
    }

    let mut editor = Editor::new(config.scale_bar.clone());
    let ticket = editor.begin_analysis(img)?;
    editor.complete_analysis(ticket, Ok(suggestion));
    let Some(session) = editor.session_mut() else {
        bail!("editor did not open a session");
    };

    let unit = if args.percent {
        InsetUnit::Percent
    } else {
        InsetUnit::Pixels
    };
    for (edge, value) in [
        (Edge::Top, args.top),
        (Edge::Bottom, args.bottom),
        (Edge::Left, args.left),
        (Edge::Right, args.right),
    ] {
        if let Some(v) = value {
            session.edit_inset(edge, &v.to_string(), unit);
        }
    }

    if let Some(known) = args.known {
        session.calibration.known_distance = known;
    }
    if let Some(ref u) = args.unit {
        session.set_unit(u.clone());
        session.settings.length_unit = u.clone();
    }
    match (args.start, args.end) {
        (Some(a), Some(b)) => {
            session.click(a);
            session.click(b);
        }
        (None, None) => {}
        _ => bail!("--start and --end must be given together"),
    }

    let settings = &mut session.settings;
    if let Some(v) = args.length {
        settings.length_value = v;
    }
    if let Some(c) = args.corner {
        settings.corner = c;
    }
    if let Some(t) = args.thickness {
        settings.bar_thickness_px = t;
    }
    if let Some(f) = args.font_size {
        settings.label_font_size_px = f;
    }
    if let Some(p) = args.padding {
        settings.padding_px = p;
    }
    if let Some(c) = args.bar_color {
        settings.bar_color = c;
    }
    if let Some(c) = args.label_color {
        settings.label_color = c;
    }
    settings.visible = !args.no_bar;

    session.set_mode(Mode::Edit);
    let font = config.label_font();

    if let Some(ref path) = args.preview {
        let preview = session.preview(&config.overlay, font.as_ref());
        save_png(&preview, path)
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_export_path(&args.file));

    let exported = if session.settings.visible {
        session.export(font.as_ref()).context(
            "Cannot export a scale bar without calibration; pass --start, --end and --known, or --no-bar",
        )?
    } else {
        let (w, h) = session.dimensions();
        render_export(&ExportInput {
            image: session.image(),
            crop: session.crop.validated(w, h)?,
            calibration: &session.calibration,
            settings: &session.settings,
            font: font.as_ref(),
        })
    };
    save_png(&exported, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_process_summary(&args.file, &output, session, font.as_ref());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_parses_pairs() {
        assert_eq!(parse_point("12,34.5").unwrap(), Point::new(12.0, 34.5));
        assert_eq!(parse_point(" 1 , 2 ").unwrap(), Point::new(1.0, 2.0));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }
}
