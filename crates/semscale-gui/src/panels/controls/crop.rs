use semscale_core::crop::{Edge, InsetUnit};

use crate::app::SemScaleApp;
use crate::panels::helpers::{enum_combo, lenient_field};

pub(super) fn crop_section(ui: &mut egui::Ui, app: &mut SemScaleApp) {
    let Some(session) = app.editor.session_mut() else {
        return;
    };
    let c = session.crop;
    let status = format!("{}x{}", c.width, c.height);
    super::section_header(ui, "Crop", Some(&status));
    ui.add_space(4.0);

    enum_combo(ui, "Units", &mut app.ui_state.inset_unit, InsetUnit::ALL);
    let unit = app.ui_state.inset_unit;

    egui::Grid::new("crop_insets").num_columns(2).show(ui, |ui| {
        for edge in Edge::ALL {
            ui.label(capitalize(edge));
            let current = session.inset_display(edge, unit);
            let buffer = app.ui_state.inset_text_mut(edge);
            if let Some(text) = lenient_field(ui, buffer, current, 80.0) {
                session.edit_inset(edge, &text, unit);
                app.ui_state.preview_dirty = true;
            }
            ui.end_row();
        }
    });

    ui.small(format!("Origin ({}, {})", c.x, c.y));
}

fn capitalize(edge: Edge) -> String {
    let name = edge.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}
