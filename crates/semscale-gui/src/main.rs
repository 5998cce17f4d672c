mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::PathBuf;

use clap::Parser;
use semscale_core::config::AppConfig;

#[derive(Parser)]
#[command(name = "semscale-gui", about = "Interactive SEM scale-bar editor")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image to open on startup
    file: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::load_or_default(args.config.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("SemScale"),
        ..Default::default()
    };

    eframe::run_native(
        "SemScale",
        options,
        Box::new(move |cc| {
            let mut app = app::SemScaleApp::new(&cc.egui_ctx, config);
            if let Some(path) = args.file {
                app.open_path(path);
            }
            Ok(Box::new(app))
        }),
    )
}
