use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use earth_defense::config;
use earth_defense::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use earth_defense::{audio, earth, enemy, graphics, menu, player, rendering, session, viewport};

/// Enemies and projectiles are kinematic, but keep the world weightless in case
/// a dynamic body is ever added.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Earth Defense".into(),
            resolution: WindowResolution::new(
                DEFAULT_VIEWPORT_WIDTH as u32,
                DEFAULT_VIEWPORT_HEIGHT as u32,
            ),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    .init_resource::<viewport::Viewport>()
    // One world unit per logical pixel, matching the sprite layout.
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
    .add_plugins((
        session::SessionPlugin,
        earth::EarthPlugin,
        enemy::EnemyPlugin,
        player::PlayerPlugin,
        menu::MenuPlugin,
        audio::GameAudioPlugin,
    ))
    .add_systems(
        Startup,
        (
            viewport::init_viewport_system,
            graphics::setup_camera,
            rendering::setup_hud_score,
            setup_physics_config,
        ),
    )
    .add_systems(
        Update,
        (
            viewport::viewport_resize_system.before(earth::earth_resize_system),
            rendering::hud_score_display_system,
        ),
    );

    // The first state transition builds the initial scene ahead of PreStartup,
    // so the file must be read before the app runs.
    config::install_game_config(&mut app, config::read_game_config(config::GAME_CONFIG_PATH));

    app.run();
}
