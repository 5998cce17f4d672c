use std::path::PathBuf;

use semscale_core::crop::{Edge, InsetUnit};

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,

    /// Label of the running background task (None = idle).
    pub running_task: Option<String>,

    /// Log messages.
    pub log_messages: Vec<String>,

    /// How crop insets are shown and entered.
    pub inset_unit: InsetUnit,
    /// Text buffers for the inset fields, indexed like `Edge::ALL`.
    pub inset_text: [String; 4],
    pub known_distance_text: String,

    /// Preview must be re-rendered before the next paint.
    pub preview_dirty: bool,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.running_task.is_some()
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn inset_text_mut(&mut self, edge: Edge) -> &mut String {
        let idx = Edge::ALL.iter().position(|e| *e == edge).unwrap_or(0);
        &mut self.inset_text[idx]
    }

    /// Forget everything tied to the current image. Logs are kept.
    pub fn reset_session(&mut self) {
        self.file_path = None;
        self.running_task = None;
        self.inset_text = Default::default();
        self.known_distance_text.clear();
        self.preview_dirty = true;
    }
}
