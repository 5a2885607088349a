use bevy_egui::egui;

use crate::model::RegionSelector;

/// Format a zoom factor: whole numbers as "2x", fractional as "1.4x"
pub fn format_zoom(level: f32) -> String {
    if level.fract().abs() < 1e-3 {
        format!("{}x", level.round() as i32)
    } else {
        format!("{:.1}x", level)
    }
}

/// Get a scaled font size with minimum of 12
pub fn scaled_font(base_size: f32, scale: f32) -> f32 {
    (base_size.max(12.0) * scale).max(12.0)
}

/// Get a scaled margin/spacing value
pub fn scaled_margin(base_size: f32, scale: f32) -> f32 {
    base_size * scale
}

/// Drive a selector from an egui drag interaction over the displayed image.
///
/// Positions are translated to be relative to `surface` (the on-screen rect
/// of the image), which keeps the selector itself in plain display
/// coordinates. egui keeps sending drag events to the widget that started the
/// gesture, so a drag that leaves the surface still finalizes on release.
pub fn selection_gesture(
    response: &egui::Response,
    surface: egui::Rect,
    selector: &mut RegionSelector,
) {
    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            selector.begin_drag((pos.x - surface.min.x, pos.y - surface.min.y));
        }
    } else if response.dragged() && selector.is_dragging() {
        if let Some(pos) = response.interact_pointer_pos() {
            selector.drag_to((pos.x - surface.min.x, pos.y - surface.min.y));
        }
    }
    if response.drag_stopped() {
        selector.end_drag();
    }
}

/// Draw the active or committed selection rectangle over the image
pub fn draw_selection(painter: &egui::Painter, surface: egui::Rect, selector: &RegionSelector) {
    let Some(rect) = selector.visible_rect() else {
        return;
    };
    let screen_rect = egui::Rect::from_min_size(
        surface.min + egui::vec2(rect.left, rect.top),
        egui::vec2(rect.width, rect.height),
    );
    painter.rect_filled(
        screen_rect,
        0.0,
        egui::Color32::from_rgba_unmultiplied(90, 160, 255, 40),
    );
    painter.rect_stroke(
        screen_rect,
        0.0,
        egui::Stroke::new(1.5, egui::Color32::from_rgb(90, 160, 255)),
    );
}

/// Render a tab-style button for the main view switcher
pub fn tab_button(
    ui: &mut egui::Ui,
    selected: bool,
    text: impl Into<String>,
    ui_scale: f32,
) -> egui::Response {
    let text = text.into();
    let padding = egui::vec2(scaled_margin(10.0, ui_scale), scaled_margin(5.0, ui_scale));

    let text_color = if selected {
        egui::Color32::WHITE
    } else {
        egui::Color32::from_gray(180)
    };

    let galley = ui.painter().layout_no_wrap(
        text,
        egui::FontId::proportional(scaled_font(14.0, ui_scale)),
        text_color,
    );

    let desired_size = galley.size() + padding * 2.0;
    let (rect, response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let bg = if selected {
            egui::Color32::from_rgb(70, 90, 120)
        } else if response.hovered() {
            egui::Color32::from_rgb(55, 65, 80)
        } else {
            egui::Color32::from_gray(50)
        };
        ui.painter().rect_filled(
            rect,
            egui::Rounding {
                nw: 4.0,
                ne: 4.0,
                sw: 0.0,
                se: 0.0,
            },
            bg,
        );

        // Underline the selected tab
        let stroke_color = if selected {
            egui::Color32::from_rgb(100, 140, 200)
        } else {
            egui::Color32::from_gray(40)
        };
        let stroke_y = rect.max.y - 1.0;
        ui.painter().line_segment(
            [
                egui::pos2(rect.min.x, stroke_y),
                egui::pos2(rect.max.x, stroke_y),
            ],
            egui::Stroke::new(2.0, stroke_color),
        );

        ui.painter().galley(rect.min + padding, galley, text_color);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zoom() {
        assert_eq!(format_zoom(1.0), "1x");
        assert_eq!(format_zoom(1.4), "1.4x");
        assert_eq!(format_zoom(2.0000001), "2x");
    }
}
