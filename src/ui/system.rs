use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::time::Duration;

use crate::state::{ActiveTab, AppState, DEFAULT_PANEL_MARGIN};
use crate::ui::assistant::render_assistant;
use crate::ui::inspector::render_inspector;
use crate::ui::manual_view::render_manual;
use crate::ui::simulator::render_simulator;
use crate::ui::widgets::{scaled_font, scaled_margin, tab_button};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How long a status message stays on screen
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

pub fn ui_system(mut contexts: EguiContexts, mut state: NonSendMut<AppState>) {
    let ctx = contexts.ctx_mut();

    // Apply UI scale to global text styles and spacing
    let ui_scale = state.config.ui_scale;
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(scaled_font(20.0, ui_scale)),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::proportional(scaled_font(14.0, ui_scale)),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(scaled_font(14.0, ui_scale)),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(scaled_font(12.0, ui_scale)),
    );
    style.wrap_mode = Some(egui::TextWrapMode::Extend);
    ctx.set_style(style);

    // UI scale shortcuts (Ctrl+Plus/Minus/0); consume so egui doesn't also act
    let increase_pressed = ctx.input_mut(|i| {
        i.modifiers.command
            && (i.consume_key(egui::Modifiers::COMMAND, egui::Key::Plus)
                || i.consume_key(
                    egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
                    egui::Key::Equals,
                ))
    });
    if increase_pressed && state.config.ui_scale < 2.0 {
        state.config.ui_scale = (state.config.ui_scale + 0.25).min(2.0);
        state.config.save();
    }
    let decrease_pressed =
        ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Minus));
    if decrease_pressed && state.config.ui_scale > 0.75 {
        state.config.ui_scale = (state.config.ui_scale - 0.25).max(0.75);
        state.config.save();
    }
    let reset_pressed =
        ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Num0));
    if reset_pressed && state.config.ui_scale != 1.0 {
        state.config.ui_scale = 1.0;
        state.config.save();
    }

    // Resolve any finished network requests before drawing
    state.poll_pending();

    // Floating windows first so they land on top
    render_manual(ctx, &mut state);

    // Menu bar
    let menu_font_size = scaled_font(15.0, state.config.ui_scale);
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button(egui::RichText::new("File").size(menu_font_size), |ui| {
                if ui.button("Exit").clicked() {
                    std::process::exit(0);
                }
            });
            ui.menu_button(egui::RichText::new("View").size(menu_font_size), |ui| {
                if ui.button("Zoom In").clicked() {
                    state.navigator.zoom_in();
                    ui.close_menu();
                }
                if ui.button("Zoom Out").clicked() {
                    state.navigator.zoom_out();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Open Manual").clicked() {
                    state.manual.open_at(1);
                    ui.close_menu();
                }
            });
        });
    });

    // Tab row
    egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let tabs = [
                (ActiveTab::Simulator, "Simulator"),
                (ActiveTab::Inspector, "Inspector"),
                (ActiveTab::Assistant, "Assistant"),
            ];
            for (tab, label) in tabs {
                if tab_button(ui, state.active_tab == tab, label, ui_scale).clicked() {
                    state.active_tab = tab;
                }
            }
        });
    });

    // Status bar
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let expired = matches!(
                &state.status_message,
                Some((_, when)) if when.elapsed() >= STATUS_TIMEOUT
            );
            if expired {
                state.status_message = None;
            }
            if let Some((message, _)) = &state.status_message {
                ui.label(message);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("Showroom Studio v{}", VERSION))
                        .small()
                        .weak(),
                );
            });
        });
    });

    // Central panel dispatch
    egui::CentralPanel::default().show(ctx, |ui| {
        let margin = scaled_margin(DEFAULT_PANEL_MARGIN, ui_scale);
        ui.add_space(margin);
        match state.active_tab {
            ActiveTab::Simulator => render_simulator(ui, &mut state),
            ActiveTab::Inspector => render_inspector(ui, &mut state),
            ActiveTab::Assistant => render_assistant(ui, &mut state),
        }
    });
}
