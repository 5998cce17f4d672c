pub mod config;
pub mod info;
pub mod process;
pub mod suggest;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use semscale_core::config::AppConfig;
use semscale_core::suggestion::{Suggestion, SuggestionProvider};

pub fn load_config(path: Option<&Path>) -> AppConfig {
    AppConfig::load_or_default(path)
}

/// Run the analyzer on the raw file bytes behind a spinner. Errors are
/// returned unresolved so callers decide whether to fall back.
pub fn run_provider(
    provider: &dyn SuggestionProvider,
    file: &Path,
) -> Result<semscale_core::error::Result<Suggestion>> {
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message(format!("Analyzing with {}", provider.name()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = provider.suggest(&bytes);
    pb.finish_and_clear();
    Ok(outcome)
}
