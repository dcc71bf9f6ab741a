//! Fluent builders for [`EnemyDescriptor`]s.
//!
//! Builders only assemble data.  Turning a descriptor into an engine entity is
//! a separate step, see [`super::realize::realize_enemy`].  No numeric ranges
//! are validated: a negative speed or a huge scale is passed through as given.

use super::descriptor::{EnemyDescriptor, EnemyKind, SizeCategory};
use crate::constants::{BOSS_HITS_TO_DESTROY, SOLDIER_DEFAULT_SCALE, SOLDIER_DEFAULT_SPEED};
use bevy::prelude::*;

/// Builds asteroid descriptors.
///
/// ```rust
/// use earth_defense::enemy::AsteroidBuilder;
///
/// let asteroid = AsteroidBuilder::new()
///     .size(2)
///     .position(10.0, 20.0)
///     .velocity(5.0, 0.0)
///     .angular_velocity(10.0)
///     .build();
/// assert_eq!(asteroid.scale, 0.08);
/// ```
#[derive(Debug, Clone)]
pub struct AsteroidBuilder {
    size: SizeCategory,
    position: Vec2,
    velocity: Vec2,
    angular_velocity: f32,
}

impl Default for AsteroidBuilder {
    fn default() -> Self {
        Self {
            size: SizeCategory::Large,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
        }
    }
}

impl AsteroidBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size from a discrete category (1 small, 2 medium, anything else large).
    pub fn size(mut self, category: u8) -> Self {
        self.size = SizeCategory::from_category(category);
        self
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Velocity from a speed and a heading in radians.
    pub fn velocity(mut self, speed: f32, angle: f32) -> Self {
        self.velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
        self
    }

    /// Spin in degrees per second.
    pub fn angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn build(self) -> EnemyDescriptor {
        EnemyDescriptor {
            kind: EnemyKind::Asteroid { size: self.size },
            position: self.position,
            velocity: self.velocity,
            angular_velocity: self.angular_velocity,
            scale: self.size.scale(),
            speed: self.velocity.length(),
            hit_points: 1,
        }
    }
}

/// Builds alien soldier and alien boss descriptors.
#[derive(Debug, Clone)]
pub struct AlienSoldierBuilder {
    kind: EnemyKind,
    position: Vec2,
    scale: f32,
    speed: f32,
    heading: f32,
    angular_velocity: f32,
    health: u32,
}

impl Default for AlienSoldierBuilder {
    fn default() -> Self {
        Self {
            kind: EnemyKind::AlienSoldier,
            position: Vec2::ZERO,
            scale: SOLDIER_DEFAULT_SCALE,
            speed: SOLDIER_DEFAULT_SPEED,
            heading: 0.0,
            angular_velocity: 0.0,
            health: 1,
        }
    }
}

impl AlienSoldierBuilder {
    /// A regular soldier: one hit destroys it.
    pub fn new() -> Self {
        Self::default()
    }

    /// A boss: needs [`BOSS_HITS_TO_DESTROY`] hits unless overridden with
    /// [`AlienSoldierBuilder::health`].
    pub fn boss() -> Self {
        Self {
            kind: EnemyKind::AlienBoss,
            health: BOSS_HITS_TO_DESTROY,
            ..Self::default()
        }
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Hits required to destroy this alien.
    pub fn health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    /// Direction of travel in radians.
    pub fn heading(mut self, angle: f32) -> Self {
        self.heading = angle;
        self
    }

    /// Spin in degrees per second.
    pub fn angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn build(self) -> EnemyDescriptor {
        EnemyDescriptor {
            kind: self.kind,
            position: self.position,
            velocity: Vec2::from_angle(self.heading) * self.speed,
            angular_velocity: self.angular_velocity,
            scale: self.scale,
            speed: self.speed,
            hit_points: self.health,
        }
    }
}
