use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use semscale_core::io::{check_dimensions, default_export_path, read_image_info};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let info = read_image_info(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let size = std::fs::metadata(&args.file)?.len();

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Color type:  {:?}", info.color);
    println!("File size:   {:.1} KB", size as f64 / 1024.0);
    if let Err(e) = check_dimensions(info.width, info.height) {
        println!("Unusable:    {e}");
    }
    println!("Export name: {}", default_export_path(&args.file).display());

    Ok(())
}
