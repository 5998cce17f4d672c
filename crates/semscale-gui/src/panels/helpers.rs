use semscale_core::scalebar::Color;

/// Show a ComboBox for enum selection. Returns `true` if the value changed.
pub(crate) fn enum_combo<T: PartialEq + Copy + ToString>(
    ui: &mut egui::Ui,
    label: &str,
    current: &mut T,
    options: &[T],
) -> bool {
    let resp = egui::ComboBox::from_label(label)
        .selected_text(current.to_string())
        .show_ui(ui, |ui| {
            let mut changed = false;
            for &choice in options {
                if ui
                    .selectable_value(current, choice, choice.to_string())
                    .changed()
                {
                    changed = true;
                }
            }
            changed
        });
    resp.inner == Some(true)
}

/// sRGBA color button bound to a core `Color`. Returns `true` if changed.
pub(crate) fn color_button(ui: &mut egui::Ui, label: &str, color: &mut Color) -> bool {
    let [r, g, b, a] = color.0;
    let mut c32 = egui::Color32::from_rgba_unmultiplied(r, g, b, a);
    let changed = ui
        .horizontal(|ui| {
            let changed = ui.color_edit_button_srgba(&mut c32).changed();
            ui.label(label);
            changed
        })
        .inner;
    if changed {
        *color = Color(c32.to_srgba_unmultiplied());
    }
    changed
}

/// Single-line numeric text field that keeps its own buffer while focused
/// and mirrors `current` otherwise. Returns the text when edited.
pub(crate) fn lenient_field(
    ui: &mut egui::Ui,
    buffer: &mut String,
    current: String,
    width: f32,
) -> Option<String> {
    let resp = ui.add(egui::TextEdit::singleline(buffer).desired_width(width));
    let edited = resp.changed().then(|| buffer.clone());
    if !resp.has_focus() {
        *buffer = current;
    }
    edited
}
