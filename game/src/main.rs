//! Block placement sandbox - aim at the ground or an existing block, rotate
//! the ghost preview with R, place with left click.

mod input;
mod placement;
mod scene;
mod settings;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use settings::GameSettings;

fn main() {
    let settings = GameSettings::load();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: settings.window_title.clone(),
                resolution: WindowResolution::new(settings.window_width, settings.window_height),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(settings)
        .add_plugins(scene::ScenePlugin)
        .add_plugins(placement::PlacementPlugin)
        .run();
}
