use semscale_core::scalebar::{format_label, Corner};

use crate::app::SemScaleApp;
use crate::panels::helpers::{color_button, enum_combo};

pub(super) fn scalebar_section(ui: &mut egui::Ui, app: &mut SemScaleApp) {
    let Some(session) = app.editor.session_mut() else {
        return;
    };
    let s = &mut session.settings;
    let label = format_label(s.length_value, &s.length_unit);
    super::section_header(ui, "Scale Bar", Some(&label));
    ui.add_space(4.0);

    let mut changed = ui.checkbox(&mut s.visible, "Show scale bar").changed();

    ui.add_enabled_ui(s.visible, |ui| {
        egui::Grid::new("scalebar_grid").num_columns(2).show(ui, |ui| {
            ui.label("Length");
            changed |= ui
                .add(egui::DragValue::new(&mut s.length_value).speed(0.1).range(0.0..=f64::MAX))
                .changed();
            ui.end_row();

            ui.label("Unit");
            changed |= ui
                .add(egui::TextEdit::singleline(&mut s.length_unit).desired_width(70.0))
                .changed();
            ui.end_row();

            ui.label("Thickness");
            changed |= ui
                .add(egui::DragValue::new(&mut s.bar_thickness_px).range(1..=200).suffix(" px"))
                .changed();
            ui.end_row();

            ui.label("Font size");
            changed |= ui
                .add(egui::DragValue::new(&mut s.label_font_size_px).range(4.0..=400.0).suffix(" px"))
                .changed();
            ui.end_row();

            ui.label("Padding");
            changed |= ui
                .add(egui::DragValue::new(&mut s.padding_px).range(0..=2000).suffix(" px"))
                .changed();
            ui.end_row();
        });

        changed |= enum_combo(ui, "Corner", &mut s.corner, Corner::ALL);
        changed |= color_button(ui, "Bar color", &mut s.bar_color);
        changed |= color_button(ui, "Label color", &mut s.label_color);
    });

    if app.font.is_none() {
        ui.small("No label font found; only the bar is drawn");
    }

    if changed {
        app.ui_state.preview_dirty = true;
    }
}
