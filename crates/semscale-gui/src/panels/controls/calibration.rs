use semscale_core::calibration::CalibrationPoints;
use semscale_core::session::Mode;

use crate::app::SemScaleApp;
use crate::panels::helpers::lenient_field;

pub(super) fn calibration_section(ui: &mut egui::Ui, app: &mut SemScaleApp) {
    let Some(session) = app.editor.session_mut() else {
        return;
    };
    let status = match session.calibration.points {
        CalibrationPoints::Empty => "no points",
        CalibrationPoints::HasStart { .. } => "1 point",
        CalibrationPoints::HasBoth { .. } => "2 points",
    };
    super::section_header(ui, "Calibration", Some(status));
    ui.add_space(4.0);

    if session.mode != Mode::Calibrate {
        ui.small("Switch to Calibrate mode to pick points");
    }

    let cal = &session.calibration;
    if let Some(p) = cal.points.start() {
        ui.small(format!("Start: ({:.0}, {:.0})", p.x, p.y));
    }
    if let Some(p) = cal.points.end() {
        ui.small(format!("End:   ({:.0}, {:.0})", p.x, p.y));
    }
    ui.small(format!("Distance: {:.2} px", cal.pixel_distance()));

    ui.horizontal(|ui| {
        ui.label("Known length");
        let current = session.calibration.known_distance.to_string();
        if let Some(text) =
            lenient_field(ui, &mut app.ui_state.known_distance_text, current, 70.0)
        {
            session.set_known_distance_input(&text);
            app.ui_state.preview_dirty = true;
        }
    });

    ui.horizontal(|ui| {
        ui.label("Unit");
        let mut unit = session.calibration.unit.clone();
        if ui
            .add(egui::TextEdit::singleline(&mut unit).desired_width(70.0))
            .changed()
        {
            session.set_unit(unit);
            app.ui_state.preview_dirty = true;
        }
    });

    match session.calibration.pixels_per_unit() {
        Some(ppu) => ui.small(format!("{ppu:.3} px per {}", session.calibration.unit)),
        None => ui.colored_label(egui::Color32::from_rgb(220, 160, 60), "Uncalibrated"),
    };

    if ui.button("Reset points").clicked() {
        session.reset_calibration();
        app.ui_state.preview_dirty = true;
    }
}
