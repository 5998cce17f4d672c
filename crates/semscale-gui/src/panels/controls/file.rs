use semscale_core::session::Stage;

use crate::app::SemScaleApp;

pub(super) fn file_section(ui: &mut egui::Ui, app: &mut SemScaleApp) {
    super::section_header(ui, "File", None);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui.button("Open...").clicked() {
            crate::panels::menu_bar::open_file(app);
        }
        let has_image = !matches!(app.editor.stage(), Stage::Upload);
        if ui.add_enabled(has_image, egui::Button::new("Reset")).clicked() {
            app.reset();
        }
    });

    if let Some(ref path) = app.ui_state.file_path {
        ui.label(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }

    match app.editor.stage() {
        Stage::Upload => {
            ui.small("Open a micrograph to begin");
        }
        Stage::Analyzing { image } => {
            ui.small(format!("{}x{}", image.width(), image.height()));
            ui.horizontal(|ui| {
                ui.spinner();
                ui.small("Looking for the footer and scale text...");
            });
        }
        Stage::Editing(session) => {
            let (w, h) = session.dimensions();
            ui.small(format!("{w}x{h}"));
        }
    }
}
