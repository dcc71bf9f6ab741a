//! Projectile firing, lifetime management and projectile–enemy hits.
//!
//! ## Firing rules
//!
//! - Only while the session is running.
//! - One shot per pointer-down, at most one per `fire_cooldown` seconds.
//! - At most `max_projectiles` rounds in flight; further requests are dropped
//!   silently.
//!
//! ## Hit rules
//!
//! Each hit removes one [`HitPoints`] from the enemy and consumes the
//! projectile.  At zero the enemy is despawned and the session awards its
//! score; above zero the enemy gets a short [`HitFeedback`] tint.

use super::state::{Player, PlayerFireCooldown, Projectile, ShotStats};
use crate::config::GameConfig;
use crate::enemy::realize::{ENEMY_GROUP, PROJECTILE_GROUP};
use crate::enemy::{Enemy, EnemyKind, HitFeedback, HitOutcome, HitPoints};
use crate::session::{Session, SessionScoped};
use crate::viewport::Viewport;
use bevy::input::mouse::MouseButton;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

/// Distance in front of the ship at which projectiles appear.
const MUZZLE_OFFSET: f32 = 14.0;

// ── Projectile firing ─────────────────────────────────────────────────────────

/// `true` when another projectile may be fired.
#[inline]
pub fn has_free_projectile_slot(in_flight: usize, max_projectiles: usize) -> bool {
    in_flight < max_projectiles
}

/// Fire one projectile outward along the ship's heading on pointer-down.
#[allow(clippy::too_many_arguments)]
pub fn projectile_fire_system(
    mut commands: Commands,
    q_player: Query<&Transform, With<Player>>,
    q_projectiles: Query<(), With<Projectile>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    session: Res<Session>,
    mut cooldown: ResMut<PlayerFireCooldown>,
    mut stats: ResMut<ShotStats>,
    time: Res<Time>,
    config: Res<GameConfig>,
) {
    cooldown.timer = (cooldown.timer - time.delta_secs()).max(0.0);

    if !mouse_buttons.just_pressed(MouseButton::Left) || !session.can_fire() {
        return;
    }
    let Ok(transform) = q_player.single() else {
        return;
    };
    if cooldown.timer > 0.0 {
        return;
    }
    if !has_free_projectile_slot(q_projectiles.iter().count(), config.max_projectiles) {
        stats.dropped += 1;
        return;
    }
    cooldown.timer = config.fire_cooldown;
    stats.fired += 1;

    let fire_dir = transform.rotation.mul_vec3(Vec3::Y).truncate();
    let spawn_pos = transform.translation.truncate() + fire_dir * MUZZLE_OFFSET;

    commands.spawn((
        Projectile::default(),
        SessionScoped,
        Sprite::from_color(Color::srgb(1.0, 0.9, 0.4), Vec2::splat(6.0)),
        Transform::from_translation(spawn_pos.extend(0.8)),
        RigidBody::KinematicVelocityBased,
        Velocity {
            linvel: fire_dir * config.projectile_speed,
            angvel: 0.0,
        },
        Collider::ball(config.projectile_collider_radius),
        // Sensor: hits are game logic only; no contact forces.
        Sensor,
        Ccd { enabled: true },
        CollisionGroups::new(PROJECTILE_GROUP, ENEMY_GROUP),
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
        ActiveEvents::COLLISION_EVENTS,
    ));
}

// ── Projectile lifetime ───────────────────────────────────────────────────────

/// Age projectiles each frame and despawn them when they expire or leave the
/// viewport.
pub fn despawn_old_projectiles_system(
    mut commands: Commands,
    mut q: Query<(Entity, &mut Projectile, &Transform)>,
    time: Res<Time>,
    viewport: Res<Viewport>,
    config: Res<GameConfig>,
) {
    let dt = time.delta_secs();
    let half = Vec2::new(viewport.width, viewport.height) / 2.0 + config.edge_offset;
    for (entity, mut proj, transform) in q.iter_mut() {
        proj.age += dt;
        let p = transform.translation.truncate();
        let off_screen = p.x.abs() > half.x || p.y.abs() > half.y;
        if proj.age >= config.projectile_lifetime || off_screen {
            commands.entity(entity).despawn();
        }
    }
}

// ── Projectile hits ───────────────────────────────────────────────────────────

/// Resolve projectile–enemy sensor contacts reported by Rapier.
///
/// A projectile is consumed by its first contact, and an enemy destroyed in
/// this frame ignores any later contact, so nothing is scored twice.
pub fn projectile_hit_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_projectiles: Query<(), With<Projectile>>,
    mut q_enemies: Query<(&EnemyKind, &mut HitPoints), With<Enemy>>,
    mut session: ResMut<Session>,
    mut stats: ResMut<ShotStats>,
    config: Res<GameConfig>,
) {
    let mut spent: HashSet<Entity> = HashSet::new();
    let mut destroyed: HashSet<Entity> = HashSet::new();

    for event in collision_events.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        let (projectile, enemy) = if q_projectiles.contains(*e1) && q_enemies.contains(*e2) {
            (*e1, *e2)
        } else if q_projectiles.contains(*e2) && q_enemies.contains(*e1) {
            (*e2, *e1)
        } else {
            continue;
        };
        if spent.contains(&projectile) || destroyed.contains(&enemy) {
            continue;
        }
        let Ok((kind, mut hp)) = q_enemies.get_mut(enemy) else {
            continue;
        };

        spent.insert(projectile);
        commands.entity(projectile).despawn();
        stats.hits += 1;

        match hp.register_hit() {
            HitOutcome::Destroyed => {
                destroyed.insert(enemy);
                commands.entity(enemy).despawn();
                stats.destroyed += 1;
                if let Some(delta) = session.record_destroyed(*kind) {
                    debug!("Destroyed {kind:?} (+{delta}); score {}", session.score());
                }
            }
            HitOutcome::Damaged { remaining } => {
                commands.entity(enemy).insert(HitFeedback {
                    remaining_secs: config.hit_feedback_secs,
                });
                debug!("{kind:?} hit, {remaining} hits left");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::SizeCategory;
    use crate::session::SessionPhase;
    use bevy::state::app::StatesPlugin;

    fn hit_test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<SessionPhase>();
        app.add_message::<CollisionEvent>();
        app.insert_resource(GameConfig::default());
        app.insert_resource(ShotStats::default());
        let mut session = Session::default();
        session.start();
        app.insert_resource(session);
        app.add_systems(PostUpdate, projectile_hit_system);
        app
    }

    fn spawn_enemy(app: &mut App, kind: EnemyKind, hp: u32) -> Entity {
        app.world_mut().spawn((Enemy, kind, HitPoints(hp))).id()
    }

    fn shoot(app: &mut App, enemy: Entity) -> Entity {
        let projectile = app.world_mut().spawn(Projectile::default()).id();
        app.world_mut().write_message(CollisionEvent::Started(
            projectile,
            enemy,
            bevy_rapier2d::rapier::geometry::CollisionEventFlags::SENSOR,
        ));
        projectile
    }

    fn score(app: &App) -> i32 {
        app.world().resource::<Session>().score()
    }

    #[test]
    fn free_slot_until_cap() {
        assert!(has_free_projectile_slot(0, 10));
        assert!(has_free_projectile_slot(9, 10));
        assert!(!has_free_projectile_slot(10, 10));
        assert!(!has_free_projectile_slot(0, 0));
    }

    #[test]
    fn one_hit_destroys_asteroid_and_scores() {
        let mut app = hit_test_app();
        let asteroid = spawn_enemy(
            &mut app,
            EnemyKind::Asteroid {
                size: SizeCategory::Large,
            },
            1,
        );
        let projectile = shoot(&mut app, asteroid);

        app.update();

        assert!(app.world().get_entity(asteroid).is_err());
        assert!(app.world().get_entity(projectile).is_err());
        assert_eq!(score(&app), 5);
    }

    #[test]
    fn boss_needs_three_hits() {
        let mut app = hit_test_app();
        let boss = spawn_enemy(&mut app, EnemyKind::AlienBoss, 3);

        for _ in 0..2 {
            shoot(&mut app, boss);
            app.update();
        }
        assert!(app.world().get_entity(boss).is_ok());
        assert!(app.world().get::<HitFeedback>(boss).is_some());
        assert_eq!(app.world().get::<HitPoints>(boss), Some(&HitPoints(1)));
        assert_eq!(score(&app), 0);

        shoot(&mut app, boss);
        app.update();
        assert!(app.world().get_entity(boss).is_err());
        assert_eq!(score(&app), 20);
    }

    #[test]
    fn enemy_destroyed_once_even_with_two_contacts_in_one_frame() {
        let mut app = hit_test_app();
        let soldier = spawn_enemy(&mut app, EnemyKind::AlienSoldier, 1);
        shoot(&mut app, soldier);
        let second = shoot(&mut app, soldier);

        app.update();

        assert_eq!(score(&app), 10);
        // The second projectile found nothing left to hit and is still in flight.
        assert!(app.world().get_entity(second).is_ok());
        let stats = *app.world().resource::<ShotStats>();
        assert_eq!(stats.destroyed, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn mixed_destroys_sum_to_nineteen() {
        let mut app = hit_test_app();
        for kind in [
            EnemyKind::Asteroid {
                size: SizeCategory::Small,
            },
            EnemyKind::Asteroid {
                size: SizeCategory::Medium,
            },
            EnemyKind::Asteroid {
                size: SizeCategory::Large,
            },
            EnemyKind::AlienSoldier,
        ] {
            let e = spawn_enemy(&mut app, kind, 1);
            shoot(&mut app, e);
            app.update();
        }
        assert_eq!(score(&app), 19);
    }

    fn fire_test_app(running: bool, in_flight: usize) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(ShotStats::default());
        app.insert_resource(PlayerFireCooldown::default());
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        app.insert_resource(buttons);
        let mut session = Session::default();
        if running {
            session.start();
        }
        app.insert_resource(session);
        app.add_systems(Update, projectile_fire_system);
        app.world_mut().spawn((Player, Transform::from_translation(Vec3::new(0.0, 200.0, 1.0))));
        for _ in 0..in_flight {
            app.world_mut().spawn(Projectile::default());
        }
        app
    }

    fn projectile_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world
            .query_filtered::<Entity, With<Projectile>>()
            .iter(world)
            .count()
    }

    #[test]
    fn fire_spawns_projectile_when_running() {
        let mut app = fire_test_app(true, 0);
        app.update();
        assert_eq!(projectile_count(&mut app), 1);
        assert_eq!(app.world().resource::<ShotStats>().fired, 1);
    }

    #[test]
    fn fire_ignored_before_start() {
        let mut app = fire_test_app(false, 0);
        app.update();
        assert_eq!(projectile_count(&mut app), 0);
    }

    #[test]
    fn fire_dropped_when_pool_exhausted() {
        let mut app = fire_test_app(true, MAX_IN_FLIGHT);
        app.update();
        assert_eq!(projectile_count(&mut app), MAX_IN_FLIGHT);
        let stats = *app.world().resource::<ShotStats>();
        assert_eq!(stats.fired, 0);
        assert_eq!(stats.dropped, 1);
    }

    const MAX_IN_FLIGHT: usize = crate::constants::MAX_PROJECTILES;
}
