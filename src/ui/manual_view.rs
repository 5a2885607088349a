use bevy_egui::egui;

use crate::state::AppState;

/// Modal-style window over the paginated owner's manual. The document itself
/// opens in the system viewer via the `#page=<n>` fragment convention.
pub fn render_manual(ctx: &egui::Context, state: &mut AppState) {
    if !state.manual.is_open() {
        return;
    }

    let mut open = true;
    egui::Window::new("Owner's Manual")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⏴ Previous").clicked() {
                    state.manual.prev_page();
                }
                ui.label(format!(
                    "Page {} of {}",
                    state.manual.current_page(),
                    state.manual.total_pages()
                ));
                if ui.button("Next ⏵").clicked() {
                    state.manual.next_page();
                }
            });
            ui.separator();
            let url = state.manual.fragment_url();
            ui.hyperlink_to(format!("Open {}", url), url);
        });

    if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.manual.close();
    }
}
