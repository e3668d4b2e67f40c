use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::WindowResolution,
};
use toroidal_life::{camera::CamPlugin, life::LifePlugin, state::GameState};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Conway's Game of Life".into(),
                        resizable: true,
                        focused: true,
                        present_mode: bevy::window::PresentMode::AutoVsync,
                        mode: bevy::window::WindowMode::Windowed,
                        resolution: WindowResolution::new(900., 900.),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins((FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin::default()))
        .init_state::<GameState>()
        .add_plugins((CamPlugin, LifePlugin))
        .run();
}
