use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use semscale_core::suggestion::{resolve_suggestion, CommandProvider, SuggestionProvider};

use super::{load_config, run_provider};

#[derive(Args)]
pub struct SuggestArgs {
    /// Input image file
    pub file: PathBuf,

    /// Analyzer program (overrides the config's suggestion command)
    #[arg(long)]
    pub command: Option<String>,

    /// Extra argument for the analyzer (repeatable)
    #[arg(long = "arg", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &SuggestArgs) -> Result<()> {
    let config = load_config(args.config.as_deref());
    let provider: Box<dyn SuggestionProvider> = match &args.command {
        Some(cmd) => Box::new(CommandProvider::new(cmd.clone(), args.args.clone())),
        None => config.provider(),
    };

    let outcome = run_provider(provider.as_ref(), &args.file)?;
    if let Err(ref e) = outcome {
        println!("Analyzer failed: {e}");
    }
    let suggestion = resolve_suggestion(outcome);

    println!("Provider:    {}", provider.name());
    println!("Crop Y:      {}", suggestion.suggested_crop_y);
    println!(
        "Scale text:  {}",
        suggestion.detected_scale_text.as_deref().unwrap_or("-")
    );
    match suggestion.seed() {
        Some(seed) => {
            println!("Known:       {} {}", seed.known_distance, seed.unit);
            println!("Bar length:  {} {}", seed.bar_length, seed.unit);
        }
        None => println!("Calibration: not seeded"),
    }

    Ok(())
}
