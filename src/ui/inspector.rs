use bevy_egui::egui;

use crate::file::{pick_crop_save_file, pick_image_file};
use crate::imaging::{calculate_fit_scale, save_crop, texture_from_image};
use crate::state::AppState;
use crate::ui::widgets::{draw_selection, selection_gesture};

/// Photo inspector: load an image, drag-select a region, crop it at display
/// resolution and ask the backend to explain the selected part
pub fn render_inspector(ui: &mut egui::Ui, state: &mut AppState) {
    // Load row: native picker where available, path entry otherwise
    ui.horizontal(|ui| {
        if ui.button("Browse…").clicked() {
            if let Some(path) = pick_image_file() {
                state.image_path_input = path.to_string_lossy().to_string();
            }
        }
        ui.text_edit_singleline(&mut state.image_path_input);
        if ui.button("Load").clicked() && !state.image_path_input.is_empty() {
            let path = state.image_path_input.clone();
            match state.load_source_image(&path) {
                Ok(()) => state.set_status(format!("Loaded {}", path)),
                Err(e) => state.set_status(e),
            }
        }
    });
    ui.separator();

    if state.source_image.is_none() {
        ui.label("Load a photo, then click and drag to select the part you want explained.");
        return;
    }

    // Upload the source texture lazily; a fresh image cleared the old handle
    if state.source_texture.is_none() {
        if let Some(img) = &state.source_image {
            let natural = (img.width(), img.height());
            let texture = texture_from_image(ui.ctx(), "inspector_source", img);
            state.source_texture = Some((texture, natural));
        }
    }

    let available = ui.available_size();
    let mut client_size = (0.0f32, 0.0f32);

    if let Some((texture, natural)) = &state.source_texture {
        // The rendered (client) size drives the display-to-source scaling
        let fit = calculate_fit_scale(*natural, (available.x, available.y * 0.55));
        client_size = (natural.0 as f32 * fit, natural.1 as f32 * fit);

        let (response, painter) = ui.allocate_painter(
            egui::vec2(available.x, client_size.1),
            egui::Sense::click_and_drag(),
        );
        let image_rect = egui::Rect::from_center_size(
            egui::pos2(response.rect.center().x, response.rect.min.y + client_size.1 / 2.0),
            egui::vec2(client_size.0, client_size.1),
        );
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        selection_gesture(&response, image_rect, &mut state.inspector_selector);
        draw_selection(&painter, image_rect, &state.inspector_selector);
    }

    ui.horizontal(|ui| {
        if ui.button("Explain selection").clicked() {
            if let Err(e) = state.submit_selection(client_size) {
                state.set_status(e);
            }
        }
        if ui.button("Reset selection").clicked() {
            state.inspector_selector.reset();
        }
        let has_crop = state.crop.is_some();
        if ui.add_enabled(has_crop, egui::Button::new("Save crop…")).clicked() {
            save_current_crop(state);
        }
    });
    ui.separator();

    // Crop preview + explanation
    if state.crop_texture.is_none() {
        if let Some(crop) = &state.crop {
            state.crop_texture = Some(texture_from_image(ui.ctx(), "crop_preview", &crop.image));
        }
    }
    ui.horizontal(|ui| {
        if let (Some(texture), Some(crop)) = (&state.crop_texture, &state.crop) {
            let size = egui::vec2(crop.size.0 as f32, crop.size.1 as f32);
            ui.image((texture.id(), size));
        }
        ui.vertical(|ui| {
            if state.loading {
                ui.spinner();
                ui.label("Analyzing selection…");
            } else if let Some(explanation) = &state.explanation {
                ui.label(explanation);
            }
        });
    });
}

fn save_current_crop(state: &mut AppState) {
    let Some(crop) = &state.crop else {
        state.set_status("Nothing to save yet");
        return;
    };
    let path = pick_crop_save_file()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "crop.jpg".to_string());
    match save_crop(&path, crop) {
        Ok(()) => state.set_status(format!("Saved crop to {}", path)),
        Err(e) => state.set_status(e),
    }
}
