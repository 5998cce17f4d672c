use crate::app::SemScaleApp;

pub(super) fn export_section(ui: &mut egui::Ui, app: &mut SemScaleApp) {
    super::section_header(ui, "Export", None);
    ui.add_space(4.0);

    let can_export = app.editor.session().is_some_and(|s| s.can_export());
    let busy = app.ui_state.is_busy();

    if ui
        .add_enabled(can_export && !busy, egui::Button::new("Export PNG..."))
        .clicked()
    {
        app.export();
    }
    if !can_export {
        ui.small("Calibrate before exporting");
    }
}
