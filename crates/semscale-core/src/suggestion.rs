//! Initial crop and calibration suggestions from an external analyzer.
//!
//! The analyzer is optional. Any failure degrades to [`Suggestion::default`]
//! (no crop line, no scale text) so the editor always opens.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SemScaleError};

/// Payload returned by an analyzer, e.g.
/// `{"suggestedCropY": 700, "detectedScaleText": "10 µm"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Suggestion {
    pub suggested_crop_y: u32,
    pub detected_scale_text: Option<String>,
}

impl Suggestion {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| SemScaleError::Suggestion(format!("malformed suggestion payload: {e}")))
    }

    pub fn scale_text(&self) -> Option<ScaleText> {
        self.detected_scale_text.as_deref().and_then(parse_scale_text)
    }

    /// Calibration defaults derived from the detected text, if it parses.
    pub fn seed(&self) -> Option<Seed> {
        self.scale_text().map(Seed::from)
    }
}

/// A parsed `"<number> <unit>"` label read off the old scale bar.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleText {
    pub value: f64,
    pub unit: String,
}

/// Parse `"10 µm"`-style text: first token numeric, the rest is the unit.
pub fn parse_scale_text(text: &str) -> Option<ScaleText> {
    let mut parts = text.split_whitespace();
    let value: f64 = parts.next()?.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let unit = parts.collect::<Vec<_>>().join(" ");
    Some(ScaleText { value, unit })
}

/// Values a successful parse seeds into a new session.
#[derive(Clone, Debug, PartialEq)]
pub struct Seed {
    pub known_distance: f64,
    pub unit: String,
    /// Default new-bar length: half the detected length.
    pub bar_length: f64,
}

impl From<ScaleText> for Seed {
    fn from(t: ScaleText) -> Self {
        Self {
            known_distance: t.value,
            bar_length: t.value / 2.0,
            unit: t.unit,
        }
    }
}

/// Source of initial suggestions for a freshly loaded image.
pub trait SuggestionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Analyze the encoded image bytes.
    fn suggest(&self, image_bytes: &[u8]) -> Result<Suggestion>;
}

/// Provider used when no analyzer is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSuggestion;

impl SuggestionProvider for NoSuggestion {
    fn name(&self) -> &str {
        "none"
    }

    fn suggest(&self, _image_bytes: &[u8]) -> Result<Suggestion> {
        Ok(Suggestion::default())
    }
}

/// Runs an external program: image bytes on stdin, JSON payload on stdout.
#[derive(Clone, Debug)]
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
}

impl CommandProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl SuggestionProvider for CommandProvider {
    fn name(&self) -> &str {
        &self.program
    }

    fn suggest(&self, image_bytes: &[u8]) -> Result<Suggestion> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SemScaleError::Suggestion(format!("failed to start {}: {e}", self.program)))?;

        let stdin = child.stdin.take();
        // Feed stdin from another thread so a chatty child cannot deadlock
        // on a full stdout pipe.
        let output = std::thread::scope(|s| {
            s.spawn(move || {
                if let Some(mut stdin) = stdin {
                    // The child may exit without reading everything.
                    let _ = stdin.write_all(image_bytes);
                }
            });
            child.wait_with_output()
        })?;

        if !output.status.success() {
            return Err(SemScaleError::Suggestion(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        Suggestion::from_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Apply the mandatory fallback: any error becomes the default suggestion.
pub fn resolve_suggestion(outcome: Result<Suggestion>) -> Suggestion {
    match outcome {
        Ok(s) => {
            tracing::debug!(crop_y = s.suggested_crop_y, text = ?s.detected_scale_text, "suggestion received");
            s
        }
        Err(e) => {
            tracing::warn!("suggestion unavailable, using defaults: {e}");
            Suggestion::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_payload() {
        let s = Suggestion::from_json(r#"{"suggestedCropY": 700, "detectedScaleText": "10 µm"}"#)
            .unwrap();
        assert_eq!(s.suggested_crop_y, 700);
        assert_eq!(s.detected_scale_text.as_deref(), Some("10 µm"));
    }

    #[test]
    fn missing_fields_default() {
        let s = Suggestion::from_json("{}").unwrap();
        assert_eq!(s, Suggestion::default());
    }

    #[test]
    fn negative_crop_y_is_malformed() {
        assert!(Suggestion::from_json(r#"{"suggestedCropY": -3}"#).is_err());
    }

    #[test]
    fn scale_text_splits_number_and_unit() {
        let t = parse_scale_text("  2.5   nm ").unwrap();
        assert_eq!(t.value, 2.5);
        assert_eq!(t.unit, "nm");
        assert!(parse_scale_text("ten µm").is_none());
        assert!(parse_scale_text("").is_none());
    }

    #[test]
    fn seed_halves_bar_length() {
        let seed = Seed::from(parse_scale_text("10 µm").unwrap());
        assert_eq!(seed.known_distance, 10.0);
        assert_eq!(seed.bar_length, 5.0);
        assert_eq!(seed.unit, "µm");
    }
}
