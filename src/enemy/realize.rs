//! Realization: turning an [`EnemyDescriptor`] into an engine entity.
//!
//! Builders stay pure; the session controller calls [`realize_enemy`] with an
//! [`EnemyRealizer`], the seam to the rendering/physics collaborator.  The
//! only failure is a collaborator without a physics backend, which is a
//! configuration error and is never retried.

use super::descriptor::EnemyDescriptor;
use super::{Enemy, HitPoints};
use crate::error::{GameError, GameResult};
use crate::session::SessionScoped;
use crate::viewport::Viewport;
use bevy::prelude::*;
use bevy_rapier2d::geometry::Group;
use bevy_rapier2d::prelude::*;

/// Collision group of enemies; projectiles live in `GROUP_2`.
pub const ENEMY_GROUP: Group = Group::GROUP_1;
/// Collision group of player projectiles.
pub const PROJECTILE_GROUP: Group = Group::GROUP_2;

/// Anything that can instantiate an enemy from its descriptor.
pub trait EnemyRealizer {
    /// `false` when the collaborator has no physics world to attach bodies to.
    fn has_physics(&self) -> bool;

    /// Create the visual + physics entity.  Only called when
    /// [`EnemyRealizer::has_physics`] is `true`.
    fn spawn_enemy(&mut self, descriptor: &EnemyDescriptor) -> Entity;
}

/// Realize `descriptor`, or fail with [`GameError::MissingCollaborator`].
pub fn realize_enemy<R: EnemyRealizer + ?Sized>(
    realizer: &mut R,
    descriptor: &EnemyDescriptor,
) -> GameResult<Entity> {
    if !realizer.has_physics() {
        return Err(GameError::MissingCollaborator {
            context: match descriptor.kind {
                super::EnemyKind::Asteroid { .. } => "asteroid",
                super::EnemyKind::AlienSoldier => "alien soldier",
                super::EnemyKind::AlienBoss => "alien boss",
            },
        });
    }
    Ok(realizer.spawn_enemy(descriptor))
}

/// [`EnemyRealizer`] backed by Bevy `Commands` and Rapier.
///
/// Descriptor positions and velocities are screen space; they are converted
/// to world space here, and the descriptor scale is multiplied by the
/// viewport factor.
pub struct SceneRealizer<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub asset_server: &'a AssetServer,
    pub viewport: Viewport,
    /// Collider radius in unscaled sprite pixels.
    pub sprite_radius: f32,
    /// Whether a Rapier context exists in the world.
    pub physics: bool,
}

impl EnemyRealizer for SceneRealizer<'_, '_, '_> {
    fn has_physics(&self) -> bool {
        self.physics
    }

    fn spawn_enemy(&mut self, descriptor: &EnemyDescriptor) -> Entity {
        let position = self.viewport.screen_to_world(descriptor.position);
        // Screen y grows downward, world y upward: flip vertical velocity and spin.
        let linvel = Vec2::new(descriptor.velocity.x, -descriptor.velocity.y);
        let angvel = -descriptor.angular_velocity.to_radians();
        let scale = descriptor.scale * self.viewport.scale_factor();

        self.commands
            .spawn((
                Enemy,
                descriptor.kind,
                HitPoints(descriptor.hit_points),
                SessionScoped,
                Sprite::from_image(self.asset_server.load(descriptor.kind.image_path())),
                Transform::from_translation(position.extend(0.5)).with_scale(Vec3::splat(scale)),
                RigidBody::KinematicVelocityBased,
                Velocity { linvel, angvel },
                Collider::ball(self.sprite_radius),
                Sensor,
                CollisionGroups::new(ENEMY_GROUP, PROJECTILE_GROUP),
                ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
                ActiveEvents::COLLISION_EVENTS,
            ))
            .id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{AlienSoldierBuilder, AsteroidBuilder};

    /// Records descriptors instead of touching an engine.
    struct RecordingRealizer {
        world: World,
        physics: bool,
        spawned: Vec<EnemyDescriptor>,
    }

    impl EnemyRealizer for RecordingRealizer {
        fn has_physics(&self) -> bool {
            self.physics
        }

        fn spawn_enemy(&mut self, descriptor: &EnemyDescriptor) -> Entity {
            self.spawned.push(descriptor.clone());
            self.world.spawn_empty().id()
        }
    }

    #[test]
    fn realization_without_physics_is_a_configuration_error() {
        let mut realizer = RecordingRealizer {
            world: World::new(),
            physics: false,
            spawned: Vec::new(),
        };
        let soldier = AlienSoldierBuilder::new().build();

        assert_eq!(
            realize_enemy(&mut realizer, &soldier),
            Err(GameError::MissingCollaborator {
                context: "alien soldier"
            })
        );
        assert!(realizer.spawned.is_empty());
    }

    #[test]
    fn realization_hands_descriptor_to_collaborator() {
        let mut realizer = RecordingRealizer {
            world: World::new(),
            physics: true,
            spawned: Vec::new(),
        };
        let asteroid = AsteroidBuilder::new().size(1).position(5.0, 6.0).build();

        let entity = realize_enemy(&mut realizer, &asteroid);
        assert!(entity.is_ok());
        assert_eq!(realizer.spawned, vec![asteroid]);
    }

    fn spawn_boss_at_top_left(mut commands: Commands, asset_server: Res<AssetServer>) {
        let descriptor = AlienSoldierBuilder::boss()
            .position(0.0, 0.0)
            .scale(0.2)
            .speed(10.0)
            .heading(std::f32::consts::FRAC_PI_2)
            .build();
        let mut realizer = SceneRealizer {
            commands: &mut commands,
            asset_server: &asset_server,
            viewport: Viewport::new(1000.0, 500.0),
            sprite_radius: 100.0,
            physics: true,
        };
        realize_enemy(&mut realizer, &descriptor).unwrap();
    }

    #[test]
    fn scene_realizer_converts_to_world_space() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<Image>();
        app.add_systems(Update, spawn_boss_at_top_left);
        app.update();

        let world = app.world_mut();
        let mut q = world.query_filtered::<(&Transform, &Velocity, &HitPoints), With<Enemy>>();
        let (transform, velocity, hp) = q.single(world).unwrap();

        assert_eq!(transform.translation.truncate(), Vec2::new(-500.0, 250.0));
        // factor = 500 / 500 = 1
        assert!((transform.scale.x - 0.2).abs() < 1e-6);
        // Screen heading +y (downward) becomes world -y.
        assert!((velocity.linvel - Vec2::new(0.0, -10.0)).length() < 1e-4);
        assert_eq!(hp.0, 3);

        let scoped = world
            .query_filtered::<Entity, (With<Enemy>, With<SessionScoped>)>()
            .iter(world)
            .count();
        assert_eq!(scoped, 1);
    }
}
