//! Pointer steering: the ship orbits Earth at a fixed radius, following the
//! pointer's bearing and facing outward.

use super::state::Player;
use crate::config::GameConfig;
use crate::earth::Earth;
use crate::session::Session;
use crate::viewport::Viewport;
use bevy::prelude::*;
use bevy::window::CursorMoved;
use std::f32::consts::FRAC_PI_2;

/// Ship position and rotation for a pointer at `pointer` (world space).
///
/// The ship sprite points along its local +Y, so the rotation is the bearing
/// minus a quarter turn.
pub fn orbit_pose(centre: Vec2, pointer: Vec2, radius: f32) -> (Vec2, f32) {
    let offset = pointer - centre;
    let angle = if offset == Vec2::ZERO {
        FRAC_PI_2
    } else {
        offset.y.atan2(offset.x)
    };
    (centre + Vec2::from_angle(angle) * radius, angle - FRAC_PI_2)
}

/// Move the ship to follow the latest pointer position while steering is allowed.
pub fn pointer_steering_system(
    mut cursor: MessageReader<CursorMoved>,
    session: Res<Session>,
    viewport: Res<Viewport>,
    config: Res<GameConfig>,
    q_earth: Query<&Transform, (With<Earth>, Without<Player>)>,
    mut q_player: Query<&mut Transform, With<Player>>,
) {
    // Drain every frame so stale moves are not replayed once steering resumes.
    let Some(event) = cursor.read().last() else {
        return;
    };
    if !session.can_steer() {
        return;
    }
    let Ok(earth) = q_earth.single() else {
        return;
    };
    let Ok(mut transform) = q_player.single_mut() else {
        return;
    };

    let pointer = viewport.screen_to_world(event.position);
    let (position, rotation) = orbit_pose(earth.translation.truncate(), pointer, config.orbit_radius);
    transform.translation.x = position.x;
    transform.translation.y = position.y;
    transform.rotation = Quat::from_rotation_z(rotation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn pose_keeps_orbit_radius_and_faces_outward() {
        let (pos, rot) = orbit_pose(Vec2::ZERO, Vec2::new(300.0, 0.0), 200.0);
        assert!((pos - Vec2::new(200.0, 0.0)).length() < 1e-4);
        // Local +Y rotated by `rot` points away from Earth.
        let forward = Quat::from_rotation_z(rot).mul_vec3(Vec3::Y).truncate();
        assert!((forward - Vec2::X).length() < 1e-4);

        let (pos, _) = orbit_pose(Vec2::new(10.0, 10.0), Vec2::new(10.0, -500.0), 200.0);
        assert!((pos - Vec2::new(10.0, -190.0)).length() < 1e-3);
    }

    #[test]
    fn pointer_on_centre_does_not_produce_nan() {
        let (pos, rot) = orbit_pose(Vec2::ZERO, Vec2::ZERO, 200.0);
        assert!(pos.is_finite());
        assert!(rot.is_finite());
    }

    fn steering_app(running: bool) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.add_message::<CursorMoved>();
        app.insert_resource(GameConfig::default());
        app.insert_resource(Viewport::new(800.0, 600.0));
        let mut session = Session::default();
        if running {
            session.start();
        }
        app.insert_resource(session);
        app.add_systems(Update, pointer_steering_system);
        app.world_mut().spawn((Earth, Transform::default()));
        app.world_mut()
            .spawn((Player, Transform::from_translation(Vec3::new(0.0, 200.0, 1.0))));
        app
    }

    fn move_pointer(app: &mut App, screen: Vec2) {
        let window = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(CursorMoved {
            window,
            position: screen,
            delta: None,
        });
        app.update();
    }

    fn player_translation(app: &mut App) -> Vec3 {
        let world = app.world_mut();
        world
            .query_filtered::<&Transform, With<Player>>()
            .single(world)
            .unwrap()
            .translation
    }

    #[test]
    fn running_session_follows_pointer() {
        let mut app = steering_app(true);
        // Screen (800, 300) is world (400, 0): due right of Earth.
        move_pointer(&mut app, Vec2::new(800.0, 300.0));
        let t = player_translation(&mut app);
        assert!((t.truncate() - Vec2::new(200.0, 0.0)).length() < 1e-3);
        assert_eq!(t.z, 1.0);
    }

    #[test]
    fn steering_ignored_before_start() {
        let mut app = steering_app(false);
        move_pointer(&mut app, Vec2::new(800.0, 300.0));
        let t = player_translation(&mut app);
        assert_eq!(t.truncate(), Vec2::new(0.0, 200.0));
    }
}
