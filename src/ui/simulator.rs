use bevy_egui::egui;
use std::time::Instant;

use crate::imaging::{calculate_fit_scale, load_texture_from_path};
use crate::model::Direction;
use crate::state::AppState;
use crate::ui::widgets::{draw_selection, format_zoom, selection_gesture};

/// 360° turntable over the configured frame sequence, with press-and-hold
/// rotation, zoom, and a drag-selection overlay on the displayed frame
pub fn render_simulator(ui: &mut egui::Ui, state: &mut AppState) {
    let now = Instant::now();
    state.navigator.tick(now);

    // Rotation and zoom controls
    ui.horizontal(|ui| {
        let prev = ui.button("⏴ Rotate");
        let next = ui.button("Rotate ⏵");

        // Hold-to-rotate: mirror mousedown/mouseup rather than clicks
        let prev_held = prev.is_pointer_button_down_on();
        let next_held = next.is_pointer_button_down_on();
        if prev_held && !state.navigator.is_repeating() {
            state.navigator.start_continuous(Direction::Previous, now);
        } else if next_held && !state.navigator.is_repeating() {
            state.navigator.start_continuous(Direction::Next, now);
        } else if !prev_held && !next_held {
            state.navigator.stop_continuous();
        }

        ui.separator();
        if ui.button("Zoom −").clicked() {
            state.navigator.zoom_out();
        }
        ui.label(format_zoom(state.navigator.zoom()));
        if ui.button("Zoom +").clicked() {
            state.navigator.zoom_in();
        }

        ui.separator();
        ui.label(format!(
            "Frame {} / {}",
            state.navigator.sequence().index() + 1,
            state.navigator.sequence().len()
        ));
    });

    // Selection controls for the overlay
    ui.horizontal(|ui| {
        if ui.button("Identify selected area").clicked() {
            match state.sim_selector.committed_rect() {
                Some(rect) => {
                    state.set_status(format!(
                        "Selected area: ({:.0}, {:.0}) - {:.0}x{:.0} px",
                        rect.left, rect.top, rect.width, rect.height
                    ));
                    state.sim_selector.reset();
                }
                None => state.set_status("Please select a part of the image first"),
            }
        }
        if ui.button("Reset selection").clicked() {
            state.sim_selector.reset();
        }
    });
    ui.separator();

    // Warm the texture cache for the current frame. A frame that fails to
    // load renders as a placeholder; the turntable itself keeps working.
    let path = state.navigator.sequence().current_path();
    if !state.frame_texture_cache.contains_key(&path) && !state.missing_frames.contains(&path) {
        match load_texture_from_path(ui.ctx(), &path) {
            Ok(entry) => {
                state.frame_texture_cache.insert(path.clone(), entry);
            }
            Err(e) => {
                log::warn!("frame asset unavailable: {}", e);
                state.missing_frames.insert(path.clone());
            }
        }
    }

    let available = ui.available_size();
    let (response, painter) = ui.allocate_painter(available, egui::Sense::click_and_drag());
    painter.rect_filled(response.rect, 0.0, egui::Color32::from_rgb(24, 24, 28));

    if let Some((texture, natural)) = state.frame_texture_cache.get(&path) {
        let fit = calculate_fit_scale(*natural, (available.x, available.y));
        let scale = fit * state.navigator.zoom();
        let size = egui::vec2(natural.0 as f32 * scale, natural.1 as f32 * scale);
        let image_rect = egui::Rect::from_center_size(response.rect.center(), size);

        // Dim the frame slightly while a transition settles
        let tint = if state.navigator.is_transitioning(now) {
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200)
        } else {
            egui::Color32::WHITE
        };
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            tint,
        );

        selection_gesture(&response, image_rect, &mut state.sim_selector);
        draw_selection(&painter, image_rect, &state.sim_selector);
    } else {
        painter.text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("frame unavailable: {}", path),
            egui::FontId::proportional(14.0),
            egui::Color32::GRAY,
        );
    }

    // Keep ticking while a button is held, even if nothing else repaints
    if state.navigator.is_repeating() {
        ui.ctx().request_repaint();
    }
}
