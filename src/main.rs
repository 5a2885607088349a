use bevy::prelude::*;
use bevy_egui::EguiPlugin;

mod file;
mod imaging;
mod model;
mod net;
mod state;
mod ui;

use state::AppState;
use ui::ui_system;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Showroom Studio".into(),
                resolution: (1600., 900.).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .init_non_send_resource::<AppState>()
        .add_systems(Startup, setup)
        .add_systems(Update, ui_system)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
