use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compositor::OverlayStyle;
use crate::error::{Result, SemScaleError};
use crate::font::LabelFont;
use crate::magnifier::MagnifierConfig;
use crate::scalebar::ScaleBarSettings;
use crate::suggestion::{CommandProvider, NoSuggestion, SuggestionProvider};

/// User configuration, read from TOML. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scale_bar: ScaleBarSettings,
    pub overlay: OverlayStyle,
    pub magnifier: MagnifierConfig,
    pub font: FontConfig,
    pub suggestion: SuggestionConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// TTF/OTF used for labels. System fonts are searched when unset.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// External analyzer; receives image bytes on stdin, prints JSON.
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| SemScaleError::Config(format!("{}: {e}", path.display())))
    }

    /// Load `path` if given, logging and falling back to defaults on error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "config loaded");
                config
            }
            Err(e) => {
                tracing::warn!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SemScaleError::Config(e.to_string()))
    }

    pub fn provider(&self) -> Box<dyn SuggestionProvider> {
        match &self.suggestion.command {
            Some(cmd) if !cmd.trim().is_empty() => {
                Box::new(CommandProvider::new(cmd.clone(), self.suggestion.args.clone()))
            }
            _ => Box::new(NoSuggestion),
        }
    }

    pub fn label_font(&self) -> Option<LabelFont> {
        LabelFont::resolve(self.font.path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
            [scale_bar]
            corner = "top-left"
            bar_color = "#000000"
            "##,
        )
        .unwrap();
        assert_eq!(config.scale_bar.corner, crate::scalebar::Corner::TopLeft);
        assert_eq!(config.scale_bar.padding_px, ScaleBarSettings::default().padding_px);
        assert_eq!(config.overlay, OverlayStyle::default());
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = AppConfig::default().to_toml().unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn empty_command_means_no_provider() {
        let mut config = AppConfig::default();
        config.suggestion.command = Some("  ".into());
        assert_eq!(config.provider().name(), "none");
    }
}
