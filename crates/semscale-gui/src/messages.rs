use std::path::PathBuf;
use std::time::Duration;

use image::RgbaImage;
use semscale_core::config::AppConfig;
use semscale_core::session::AnalysisTicket;
use semscale_core::suggestion::{Suggestion, SuggestionProvider};

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Read and decode an image file.
    LoadImage { path: PathBuf },

    /// Run the suggestion provider on the encoded file bytes.
    Analyze {
        ticket: AnalysisTicket,
        bytes: Vec<u8>,
    },

    /// Encode the exported image as PNG and write it.
    SaveExport { path: PathBuf, image: RgbaImage },

    /// Replace the suggestion provider (after a config import).
    SetProvider {
        provider: Box<dyn SuggestionProvider>,
    },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ImageLoaded {
        path: PathBuf,
        image: RgbaImage,
        bytes: Vec<u8>,
    },
    AnalysisComplete {
        ticket: AnalysisTicket,
        outcome: semscale_core::error::Result<Suggestion>,
        elapsed: Duration,
    },
    ExportSaved {
        path: PathBuf,
    },
    ExportCancelled,
    ConfigImported {
        config: AppConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
