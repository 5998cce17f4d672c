mod calibration;
mod crop;
mod export;
mod file;
mod mode;
mod scalebar;

const LEFT_PANEL_WIDTH: f32 = 280.0;

pub fn show(ctx: &egui::Context, app: &mut crate::app::SemScaleApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                file::file_section(ui, app);
                if app.editor.session().is_none() {
                    return;
                }
                ui.separator();
                mode::mode_section(ui, app);
                ui.separator();
                crop::crop_section(ui, app);
                ui.separator();
                calibration::calibration_section(ui, app);
                ui.separator();
                scalebar::scalebar_section(ui, app);
                ui.separator();
                export::export_section(ui, app);
            });
        });
}

fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}
