use std::path::PathBuf;
use std::sync::mpsc;

use semscale_core::config::AppConfig;
use semscale_core::font::LabelFont;
use semscale_core::session::{Editor, Mode};

use crate::convert::rgba_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{MagnifierOverlay, UIState, ViewportState};
use crate::workers;

pub struct SemScaleApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub editor: Editor,
    pub config: AppConfig,
    pub font: Option<LabelFont>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub show_about: bool,
}

impl SemScaleApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone(), config.provider());
        let font = config.label_font();

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            editor: Editor::new(config.scale_bar.clone()),
            config,
            font,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            show_about: false,
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    pub fn open_path(&mut self, path: PathBuf) {
        self.ui_state.running_task = Some("Loading".into());
        self.send_command(WorkerCommand::LoadImage { path });
    }

    /// Drop the session and any in-flight analysis.
    pub fn reset(&mut self) {
        self.editor.reset();
        self.ui_state.reset_session();
        self.viewport.clear();
        self.ui_state.add_log("Session reset".into());
    }

    pub fn apply_config(&mut self, config: AppConfig) {
        self.font = config.label_font();
        self.editor.set_defaults(config.scale_bar.clone());
        self.send_command(WorkerCommand::SetProvider {
            provider: config.provider(),
        });
        self.config = config;
        self.ui_state.preview_dirty = true;
        self.ui_state.add_log("Config imported".into());
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded { path, image, bytes } => {
                    let (w, h) = image.dimensions();
                    match self.editor.begin_analysis(image) {
                        Ok(ticket) => {
                            self.ui_state.add_log(format!("Opened: {} ({w}x{h})", path.display()));
                            self.ui_state.reset_session();
                            self.ui_state.file_path = Some(path);
                            self.ui_state.running_task = Some("Analyzing".into());
                            self.viewport.clear();
                            self.send_command(WorkerCommand::Analyze { ticket, bytes });
                        }
                        Err(e) => {
                            self.ui_state.running_task = None;
                            self.ui_state.add_log(format!("ERROR: {e}"));
                        }
                    }
                }
                WorkerResult::AnalysisComplete {
                    ticket,
                    outcome,
                    elapsed,
                } => {
                    let failure = outcome.as_ref().err().map(ToString::to_string);
                    if !self.editor.complete_analysis(ticket, outcome) {
                        continue;
                    }
                    self.ui_state.running_task = None;
                    self.ui_state.preview_dirty = true;
                    match failure {
                        Some(e) => self
                            .ui_state
                            .add_log(format!("Suggestion unavailable ({e}); using defaults")),
                        None => self.ui_state.add_log(format!(
                            "Analysis finished in {:.1}s",
                            elapsed.as_secs_f32()
                        )),
                    }
                    if let Some(session) = self.editor.session() {
                        self.ui_state.add_log(format!(
                            "Initial crop: {}x{}",
                            session.crop.width, session.crop.height
                        ));
                    }
                }
                WorkerResult::ExportSaved { path } => {
                    self.ui_state.running_task = None;
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::ExportCancelled => {
                    self.ui_state.running_task = None;
                    self.ui_state.add_log("Export cancelled".into());
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.running_task = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if !self.ui_state.preview_dirty {
            return;
        }
        self.ui_state.preview_dirty = false;

        let Some(session) = self.editor.session() else {
            self.viewport.texture = None;
            return;
        };
        let preview = session.preview(&self.config.overlay, self.font.as_ref());
        let image = rgba_to_color_image(&preview);
        let size = image.size;
        let texture = ctx.load_texture("viewport", image, egui::TextureOptions::NEAREST);
        self.viewport.texture = Some(texture);
        self.viewport.image_size = Some(size);
    }

    fn refresh_magnifier(&mut self, ctx: &egui::Context) {
        let Some(session) = self.editor.session() else {
            self.viewport.magnifier = None;
            return;
        };
        let unchanged = match (&self.viewport.magnifier, session.cursor) {
            (Some(m), Some(c)) => m.center == c && session.mode == Mode::Calibrate,
            _ => false,
        };
        if unchanged {
            return;
        }

        self.viewport.magnifier = session.magnifier(&self.config.magnifier).map(|view| {
            let texture = ctx.load_texture(
                "magnifier",
                rgba_to_color_image(&view.image),
                egui::TextureOptions::NEAREST,
            );
            MagnifierOverlay {
                texture,
                readout: view.readout,
                center: view.center,
            }
        });
        if self.viewport.magnifier.is_some() {
            ctx.request_repaint();
        }
    }

    /// Render the export on the UI thread, then let the worker encode it.
    pub fn export(&mut self) {
        let Some(session) = self.editor.session() else {
            return;
        };
        let image = match session.export(self.font.as_ref()) {
            Ok(img) => img,
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: {e}"));
                return;
            }
        };

        let default_name = semscale_core::consts::EXPORT_FILE_NAME;
        let start_dir = self
            .ui_state
            .file_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf());
        let cmd_tx = self.cmd_tx.clone();
        let result_tx = self.result_tx.clone();
        self.ui_state.running_task = Some("Exporting".into());
        std::thread::spawn(move || {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("PNG", &["png"])
                .set_file_name(default_name);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            match dialog.save_file() {
                Some(path) => {
                    let _ = cmd_tx.send(WorkerCommand::SaveExport { path, image });
                }
                None => {
                    let _ = result_tx.send(WorkerResult::ExportCancelled);
                }
            }
        });
    }
}

impl eframe::App for SemScaleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);

        self.refresh_preview(ctx);
        panels::viewport::show(ctx, self);
        self.refresh_magnifier(ctx);

        if self.show_about {
            egui::Window::new("About SemScale")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("SemScale");
                        ui.label("Micrograph footer cropping and scale bars");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
