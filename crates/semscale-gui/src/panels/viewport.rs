use semscale_core::geometry::{native_to_screen, screen_to_native, Point, Rect};

use crate::app::SemScaleApp;

const MIN_ZOOM: f32 = 0.05;
const MAX_ZOOM: f32 = 20.0;
const MAGNIFIER_OFFSET: f32 = 20.0;

pub fn show(ctx: &egui::Context, app: &mut SemScaleApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_info = app
            .viewport
            .texture
            .as_ref()
            .map(|t| (t.id(), [t.size()[0] as f32, t.size()[1] as f32]));

        let Some((texture_id, tex_size)) = texture_info else {
            show_placeholder(ui, app.editor.is_analyzing());
            return;
        };

        let image_size = resolve_image_size(app, tex_size);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        if app.viewport.needs_fit {
            fit_to_rect(&mut app.viewport.zoom, &mut app.viewport.pan_offset, image_size, rect);
            app.viewport.needs_fit = false;
        }

        handle_zoom(ui, &response, app, rect);
        handle_pan(ui, &response, app);

        if response.double_clicked() {
            fit_to_rect(&mut app.viewport.zoom, &mut app.viewport.pan_offset, image_size, rect);
        }

        let img_rect = compute_img_rect(rect, image_size, app);
        handle_pointer(ui, &response, app, img_rect, image_size);

        draw_image(ui, texture_id, img_rect);
        draw_magnifier(ui, app, rect, img_rect, image_size);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn resolve_image_size(app: &SemScaleApp, tex_size: [f32; 2]) -> egui::Vec2 {
    if let Some(size) = app.viewport.image_size {
        egui::vec2(size[0] as f32, size[1] as f32)
    } else {
        egui::vec2(tex_size[0], tex_size[1])
    }
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut SemScaleApp, rect: egui::Rect) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }

    let zoom_factor = (scroll_delta * 0.005).exp();
    let new_zoom = (app.viewport.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);

    // Zoom toward mouse cursor
    if let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) {
        let center = rect.center().to_vec2() + app.viewport.pan_offset;
        let mouse_rel = mouse_pos.to_vec2() - center;
        let scale_change = new_zoom / app.viewport.zoom;
        app.viewport.pan_offset += mouse_rel * (1.0 - scale_change);
    }

    app.viewport.zoom = new_zoom;
}

fn handle_pan(ui: &egui::Ui, response: &egui::Response, app: &mut SemScaleApp) {
    if response.dragged_by(egui::PointerButton::Middle)
        || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.command))
    {
        app.viewport.pan_offset += response.drag_delta();
    }
}

/// Track the cursor in native pixels and forward calibration clicks.
fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut SemScaleApp,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) {
    let Some(session) = app.editor.session_mut() else {
        return;
    };
    let display = Rect::new(img_rect.min.x, img_rect.min.y, img_rect.width(), img_rect.height());
    let native_size = (image_size.x as u32, image_size.y as u32);
    let inside = |pos: egui::Pos2| {
        let p = Point::new(pos.x, pos.y);
        display
            .contains(p)
            .then(|| screen_to_native(p, display, native_size))
    };

    match response.hover_pos().and_then(inside) {
        Some(native) => session.hover(native),
        None => session.leave(),
    }

    let command_held = ui.input(|i| i.modifiers.command);
    if response.clicked_by(egui::PointerButton::Primary) && !command_held {
        if let Some(native) = response.interact_pointer_pos().and_then(inside) {
            if session.click(native) {
                tracing::debug!(x = native.x, y = native.y, "calibration click");
                app.ui_state.preview_dirty = true;
            }
        }
    }
}

fn compute_img_rect(rect: egui::Rect, image_size: egui::Vec2, app: &SemScaleApp) -> egui::Rect {
    let scaled = image_size * app.viewport.zoom;
    let center = rect.center() + app.viewport.pan_offset;
    egui::Rect::from_center_size(center, scaled)
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

/// Circular zoom view beside the native point it magnifies, flipped to stay
/// inside the panel.
fn draw_magnifier(
    ui: &egui::Ui,
    app: &SemScaleApp,
    rect: egui::Rect,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) {
    let Some(ref overlay) = app.viewport.magnifier else {
        return;
    };
    let display = Rect::new(img_rect.min.x, img_rect.min.y, img_rect.width(), img_rect.height());
    let native_size = (image_size.x as u32, image_size.y as u32);
    let native = native_to_screen(overlay.center, display, native_size);
    let anchor = egui::pos2(native.x, native.y);

    let size = overlay.texture.size_vec2();
    let mut min = anchor + egui::vec2(MAGNIFIER_OFFSET, MAGNIFIER_OFFSET);
    if min.x + size.x > rect.right() {
        min.x = anchor.x - MAGNIFIER_OFFSET - size.x;
    }
    if min.y + size.y + 20.0 > rect.bottom() {
        min.y = anchor.y - MAGNIFIER_OFFSET - size.y - 20.0;
    }
    let view_rect = egui::Rect::from_min_size(min, size);

    let painter = ui.painter_at(rect);
    painter.image(
        overlay.texture.id(),
        view_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
    painter.circle_stroke(
        view_rect.center(),
        size.x / 2.0,
        egui::Stroke::new(2.0, egui::Color32::from_gray(220)),
    );
    painter.text(
        egui::pos2(view_rect.center().x, view_rect.bottom() + 4.0),
        egui::Align2::CENTER_TOP,
        &overlay.readout,
        egui::FontId::monospace(12.0),
        egui::Color32::from_white_alpha(220),
    );
}

fn show_placeholder(ui: &mut egui::Ui, analyzing: bool) {
    let text = if analyzing {
        "Analyzing..."
    } else {
        "Open a micrograph to begin"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}

fn fit_to_rect(zoom: &mut f32, pan: &mut egui::Vec2, image_size: egui::Vec2, rect: egui::Rect) {
    let available = rect.size();
    let fit_x = available.x / image_size.x;
    let fit_y = available.y / image_size.y;
    *zoom = fit_x.min(fit_y).clamp(MIN_ZOOM, MAX_ZOOM);
    *pan = egui::Vec2::ZERO;
}
