use std::path::Path;

use console::Style;
use semscale_core::font::LabelFont;
use semscale_core::scalebar::format_label;
use semscale_core::session::EditorSession;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_process_summary(
    input: &Path,
    output: &Path,
    session: &EditorSession,
    font: Option<&LabelFont>,
) {
    let s = Styles::new();
    let (w, h) = session.dimensions();
    let crop = session.crop;

    println!();
    println!("  {}", s.title.apply_to("SemScale"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(input.display()));
    println!("  {:<14}{}", s.label.apply_to("Output"), s.path.apply_to(output.display()));
    println!("  {:<14}{}", s.label.apply_to("Source"), s.value.apply_to(format!("{w}x{h}")));
    println!();

    println!("  {}", s.header.apply_to("Crop"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Origin"),
        s.value.apply_to(format!("{}, {}", crop.x, crop.y))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{}x{}", crop.width, crop.height))
    );
    println!();

    let cal = &session.calibration;
    println!("  {}", s.header.apply_to("Calibration"));
    match cal.pixels_per_unit() {
        Some(ppu) => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Measured"),
                s.value.apply_to(format!(
                    "{:.2} px = {}",
                    cal.pixel_distance(),
                    format_label(cal.known_distance, &cal.unit)
                ))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Ratio"),
                s.value.apply_to(format!("{ppu:.3} px/{}", cal.unit))
            );
        }
        None => println!("    {}", s.disabled.apply_to("uncalibrated")),
    }
    println!();

    let bar = &session.settings;
    println!("  {}", s.header.apply_to("Scale Bar"));
    if bar.visible {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Label"),
            s.value.apply_to(format_label(bar.length_value, &bar.length_unit))
        );
        println!("    {:<12}{}", s.label.apply_to("Corner"), s.value.apply_to(bar.corner));
        match font.and_then(LabelFont::source) {
            Some(path) => println!(
                "    {:<12}{}",
                s.label.apply_to("Font"),
                s.path.apply_to(path.display())
            ),
            None if font.is_some() => {
                println!("    {:<12}{}", s.label.apply_to("Font"), s.value.apply_to("embedded"))
            }
            None => println!(
                "    {:<12}{}",
                s.label.apply_to("Font"),
                s.disabled.apply_to("none (label omitted)")
            ),
        }
    } else {
        println!("    {}", s.disabled.apply_to("disabled"));
    }
    println!();
}
