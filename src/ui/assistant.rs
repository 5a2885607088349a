use bevy_egui::egui;

use crate::state::{AppState, ChatRole};

/// Chat panel backed by the remote assistant, with manual-page shortcuts on
/// answers that reference the owner's manual
pub fn render_assistant(ui: &mut egui::Ui, state: &mut AppState) {
    let mut open_page: Option<u32> = None;

    let input_area_height = 70.0;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height(ui.available_height() - input_area_height)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for (i, msg) in state.chat_messages.iter().enumerate() {
                ui.push_id(i, |ui| {
                    match msg.role {
                        ChatRole::User => {
                            ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                                ui.label(egui::RichText::new(&msg.text).strong());
                            });
                        }
                        ChatRole::Bot => {
                            ui.label(&msg.text);
                            if let Some(page) = msg.manual_page {
                                if ui
                                    .small_button(format!("📖 View page {} of the manual", page))
                                    .clicked()
                                {
                                    open_page = Some(page);
                                }
                            }
                        }
                    }
                    ui.add_space(6.0);
                });
            }
            if state.chat_pending.is_some() {
                // Typing indicator
                ui.label(egui::RichText::new("…").weak());
            }
        });

    if let Some(page) = open_page {
        state.manual.open_at(page);
    }

    ui.separator();
    if ui.button("📖 View Full Manual").clicked() {
        state.manual.open_at(1);
    }

    ui.horizontal(|ui| {
        let input_width = ui.available_width() - 70.0;
        let edit = ui.add_sized(
            [input_width, 24.0],
            egui::TextEdit::singleline(&mut state.chat_input)
                .hint_text("Ask about your vehicle…"),
        );
        let send_clicked = ui.button("Send").clicked();
        let enter_pressed =
            edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if send_clicked || enter_pressed {
            state.send_chat_message();
            edit.request_focus();
        }
    });

    // Keep polling visible while a reply is in flight
    if state.chat_pending.is_some() {
        ui.ctx().request_repaint();
    }
}
