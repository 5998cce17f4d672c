use semscale_core::session::Stage;

use crate::app::SemScaleApp;

pub fn show(ctx: &egui::Context, app: &mut SemScaleApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if let Some(ref task) = app.ui_state.running_task {
            ui.add(egui::ProgressBar::new(0.0).text(format!("{task}...")).animate(true));
        } else {
            // Invisible placeholder with the same height
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some(ref size) = app.viewport.image_size {
                ui.label(format!("{}x{}", size[0], size[1]));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", app.viewport.zoom * 100.0));
            ui.separator();
            match app.editor.stage() {
                Stage::Upload => {
                    ui.label("No image");
                }
                Stage::Analyzing { .. } => {
                    ui.label("Analyzing");
                }
                Stage::Editing(session) => {
                    ui.label(format!("Mode: {}", session.mode));
                    ui.separator();
                    match session.calibration.pixels_per_unit() {
                        Some(ppu) => ui.label(format!("{ppu:.3} px/{}", session.calibration.unit)),
                        None => ui.label("Uncalibrated"),
                    };
                    if let Some(p) = session.cursor {
                        ui.separator();
                        ui.label(semscale_core::magnifier::format_readout(p));
                    }
                }
            }
        });

        ui.add_space(2.0);
    });
}
