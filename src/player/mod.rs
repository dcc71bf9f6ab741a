//! Player module: the orbiting ship, pointer steering and projectile combat.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Player`, `Projectile`) and resources (`PlayerFireCooldown`, `ShotStats`) |
//! | [`control`] | Pointer steering: the ship follows the pointer's bearing around Earth |
//! | [`combat`] | Projectile firing, lifetime management, projectile–enemy hits |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::player::*` imports.

pub mod combat;
pub mod control;
pub mod state;

pub use combat::{
    despawn_old_projectiles_system, has_free_projectile_slot, projectile_fire_system,
    projectile_hit_system,
};
pub use control::{orbit_pose, pointer_steering_system};
pub use state::{Player, PlayerFireCooldown, Projectile, ShotStats};

use crate::config::GameConfig;
use crate::session::{despawn_session_scoped_system, SessionPhase, SessionScoped};
use bevy::prelude::*;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerFireCooldown>()
            .init_resource::<ShotStats>()
            .add_systems(
                OnEnter(SessionPhase::NotStarted),
                spawn_player.after(despawn_session_scoped_system),
            )
            .add_systems(
                OnEnter(SessionPhase::Running),
                (show_player_system, reset_shot_state_system),
            )
            .add_systems(OnEnter(SessionPhase::GameOver), hide_player_system)
            .add_systems(
                Update,
                (
                    pointer_steering_system,
                    projectile_fire_system,
                    despawn_old_projectiles_system,
                )
                    .chain()
                    .run_if(in_state(SessionPhase::Running)),
            )
            // Rapier emits collision messages during PostUpdate.
            .add_systems(
                PostUpdate,
                projectile_hit_system.run_if(in_state(SessionPhase::Running)),
            );
    }
}

// ── Ship spawn ────────────────────────────────────────────────────────────────

/// Spawn the ship on its orbit directly above Earth, hidden until the session
/// starts.
///
/// The ship carries no collider: enemies only interact with projectiles and
/// with Earth's contact radii.
pub fn spawn_player(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    commands.spawn((
        Player,
        SessionScoped,
        Sprite::from_image(asset_server.load("images/spaceship_player.png")),
        Transform::from_translation(Vec3::new(0.0, config.orbit_radius, 1.0))
            .with_scale(Vec3::splat(config.ship_scale)),
        Visibility::Hidden,
    ));
    debug!("Player ship spawned");
}

pub fn show_player_system(mut q: Query<&mut Visibility, With<Player>>) {
    for mut visibility in q.iter_mut() {
        *visibility = Visibility::Inherited;
    }
}

pub fn hide_player_system(mut q: Query<&mut Visibility, With<Player>>) {
    for mut visibility in q.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

/// Fresh shot totals and an idle cannon for every session.
pub fn reset_shot_state_system(
    mut stats: ResMut<ShotStats>,
    mut cooldown: ResMut<PlayerFireCooldown>,
) {
    *stats = ShotStats::default();
    cooldown.timer = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionPlugin};
    use bevy::state::app::StatesPlugin;

    fn player_app() -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            StatesPlugin,
            AssetPlugin::default(),
            SessionPlugin,
            PlayerPlugin,
        ));
        app.init_asset::<Image>();
        app.add_message::<bevy::window::CursorMoved>();
        app.add_message::<bevy_rapier2d::prelude::CollisionEvent>();
        app.insert_resource(GameConfig::default());
        app.init_resource::<crate::viewport::Viewport>();
        app.init_resource::<ButtonInput<bevy::input::mouse::MouseButton>>();
        app
    }

    fn player_visibility(app: &mut App) -> Visibility {
        let world = app.world_mut();
        *world
            .query_filtered::<&Visibility, With<Player>>()
            .single(world)
            .unwrap()
    }

    #[test]
    fn ship_hidden_until_start_then_shown() {
        let mut app = player_app();
        app.update();
        assert_eq!(player_visibility(&mut app), Visibility::Hidden);

        app.world_mut().resource_mut::<Session>().start();
        app.update();
        app.update();
        assert_eq!(player_visibility(&mut app), Visibility::Inherited);
    }

    #[test]
    fn shot_stats_reset_on_start() {
        let mut app = player_app();
        app.update();
        app.world_mut().resource_mut::<ShotStats>().fired = 9;

        app.world_mut().resource_mut::<Session>().start();
        app.update();
        app.update();
        assert_eq!(*app.world().resource::<ShotStats>(), ShotStats::default());
    }
}
