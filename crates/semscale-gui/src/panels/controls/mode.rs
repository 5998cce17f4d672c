use semscale_core::session::Mode;

use crate::app::SemScaleApp;
use crate::panels::helpers::enum_combo;

pub(super) fn mode_section(ui: &mut egui::Ui, app: &mut SemScaleApp) {
    super::section_header(ui, "Mode", None);
    ui.add_space(4.0);

    let Some(session) = app.editor.session_mut() else {
        return;
    };
    let mut mode = session.mode;
    if enum_combo(ui, "##mode", &mut mode, Mode::ALL) {
        session.set_mode(mode);
        app.ui_state.preview_dirty = true;
    }
    match mode {
        Mode::Calibrate => ui.small("Click both ends of the old scale bar"),
        Mode::Edit => ui.small("Adjust the crop and the new scale bar"),
    };
}
