//! Plain enemy descriptions produced by the builders.

use crate::constants::{LARGE_ASTEROID_SCALE, MEDIUM_ASTEROID_SCALE, SMALL_ASTEROID_SCALE};
use bevy::prelude::*;

/// Asteroid size class; drives sprite scale, score and the shield rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    /// Map a discrete category to a size class.
    ///
    /// | Category | Size   |
    /// |----------|--------|
    /// | 1        | Small  |
    /// | 2        | Medium |
    /// | other    | Large  |
    pub fn from_category(category: u8) -> Self {
        match category {
            1 => SizeCategory::Small,
            2 => SizeCategory::Medium,
            _ => SizeCategory::Large,
        }
    }

    /// Base sprite scale before the viewport factor is applied.
    pub fn scale(self) -> f32 {
        match self {
            SizeCategory::Small => SMALL_ASTEROID_SCALE,
            SizeCategory::Medium => MEDIUM_ASTEROID_SCALE,
            SizeCategory::Large => LARGE_ASTEROID_SCALE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
        }
    }
}

/// What an enemy is.  Attached to every realized enemy entity so collision and
/// scoring systems can read it back.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Asteroid { size: SizeCategory },
    AlienSoldier,
    AlienBoss,
}

/// Spawn groups used by the separation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyGroup {
    Asteroids,
    Soldiers,
    Bosses,
}

impl EnemyKind {
    pub fn group(self) -> EnemyGroup {
        match self {
            EnemyKind::Asteroid { .. } => EnemyGroup::Asteroids,
            EnemyKind::AlienSoldier => EnemyGroup::Soldiers,
            EnemyKind::AlienBoss => EnemyGroup::Bosses,
        }
    }

    /// `true` only for small asteroids, the one kind the glow shield absorbs.
    pub fn is_small_asteroid(self) -> bool {
        matches!(
            self,
            EnemyKind::Asteroid {
                size: SizeCategory::Small
            }
        )
    }

    /// Asset path of the sprite used for this kind.
    pub fn image_path(self) -> &'static str {
        match self {
            EnemyKind::Asteroid { .. } => "images/asteroid.png",
            EnemyKind::AlienSoldier => "images/alien_soldier.png",
            EnemyKind::AlienBoss => "images/alien_boss.png",
        }
    }
}

/// Everything needed to realize an enemy entity.
///
/// Positions and velocities are in screen space (top-left origin, y down);
/// realization converts them to world space.  `angular_velocity` is in
/// degrees per second.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyDescriptor {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub scale: f32,
    /// Movement speed the velocity was derived from (aliens only).
    pub speed: f32,
    /// Projectile hits needed to destroy the enemy.
    pub hit_points: u32,
}

impl EnemyDescriptor {
    /// Size class, for asteroids.
    pub fn size(&self) -> Option<SizeCategory> {
        match self.kind {
            EnemyKind::Asteroid { size } => Some(size),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_categories_fall_back_to_large() {
        assert_eq!(SizeCategory::from_category(1), SizeCategory::Small);
        assert_eq!(SizeCategory::from_category(2), SizeCategory::Medium);
        assert_eq!(SizeCategory::from_category(3), SizeCategory::Large);
        assert_eq!(SizeCategory::from_category(0), SizeCategory::Large);
        assert_eq!(SizeCategory::from_category(42), SizeCategory::Large);
    }

    #[test]
    fn only_small_asteroids_are_shieldable() {
        assert!(EnemyKind::Asteroid {
            size: SizeCategory::Small
        }
        .is_small_asteroid());
        assert!(!EnemyKind::Asteroid {
            size: SizeCategory::Medium
        }
        .is_small_asteroid());
        assert!(!EnemyKind::AlienSoldier.is_small_asteroid());
    }
}
