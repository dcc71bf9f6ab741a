//! Player components and resources.
//!
//! Systems that mutate this state live in the sibling modules:
//! - [`super::control`]: pointer steering around Earth
//! - [`super::combat`]: firing, projectile lifetime, projectile hits

use bevy::prelude::*;

/// Marker component for the player ship entity.
#[derive(Component)]
pub struct Player;

/// Per-projectile state attached to each fired round.
#[derive(Component, Debug, Default)]
pub struct Projectile {
    /// Seconds since this projectile was spawned.
    pub age: f32,
}

/// Enforces a minimum interval between consecutive shots.
#[derive(Resource, Default)]
pub struct PlayerFireCooldown {
    /// Remaining cooldown in seconds; decremented each frame, clamped to 0.
    pub timer: f32,
}

/// Running totals for the current session, shown on the game-over overlay.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShotStats {
    pub fired: u32,
    /// Fire requests dropped because every projectile slot was in flight.
    pub dropped: u32,
    pub hits: u32,
    pub destroyed: u32,
}

impl ShotStats {
    /// Hit ratio in `[0, 1]`; zero before the first shot.
    pub fn accuracy(self) -> f32 {
        if self.fired == 0 {
            0.0
        } else {
            self.hits as f32 / self.fired as f32
        }
    }
}
