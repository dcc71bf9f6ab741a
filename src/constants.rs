//! Centralised gameplay constants.
//!
//! Every tuneable value lives here so it can be found and changed in one
//! place. [`crate::config::GameConfig::default`] is built from these values,
//! and `assets/game.toml` may override any of them at startup.
//!
//! ## Coordinate conventions
//!
//! Spawn placement works in *screen space*: origin at the top-left corner of
//! the viewport, y growing downward, units in logical pixels.  The engine's
//! world space has its origin at the viewport centre with y growing upward;
//! see [`crate::viewport::Viewport::screen_to_world`].

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Initial window width (logical px) before the first resize notification.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

/// Initial window height (logical px).
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

/// Reference dimension used to make sprite scales and speeds
/// resolution-independent: `factor = min(width, height) / VIEWPORT_SCALE_REFERENCE`.
pub const VIEWPORT_SCALE_REFERENCE: f32 = 500.0;

// ── Spawn placement ───────────────────────────────────────────────────────────

/// Distance (px) outside the visible bounds at which enemies appear.
pub const EDGE_OFFSET: f32 = 50.0;

/// Minimum separation between spawns is `min(width, height) / SEPARATION_DIVISOR`.
pub const SEPARATION_DIVISOR: f32 = 20.0;

/// Placement attempts before a spawn cycle is skipped.
///
/// With a separation of 1/20th of the short side, a 1280×720 field needs on
/// the order of a hundred perimeter enemies before 64 attempts start failing.
pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// Base enemy speed (px/s) before the random, viewport-scaled component.
pub const ENEMY_BASE_SPEED: f32 = 20.0;

/// Upper bound of the random integer speed component, multiplied by the
/// viewport factor.
pub const ENEMY_SPEED_SPREAD: u32 = 10;

/// Seconds between asteroid spawns.
pub const ASTEROID_SPAWN_INTERVAL: f32 = 3.0;

/// Seconds between alien-soldier spawns.
pub const SOLDIER_SPAWN_INTERVAL: f32 = 7.0;

/// Seconds between alien-boss spawns.
pub const BOSS_SPAWN_INTERVAL: f32 = 20.0;

/// Constant spin applied to every spawned enemy (degrees per second).
pub const ENEMY_ANGULAR_VELOCITY_DEG: f32 = 10.0;

// ── Asteroid sizes ────────────────────────────────────────────────────────────

/// Sprite scale of a small asteroid (category 1).
pub const SMALL_ASTEROID_SCALE: f32 = 0.03;

/// Sprite scale of a medium asteroid (category 2).
pub const MEDIUM_ASTEROID_SCALE: f32 = 0.08;

/// Sprite scale of a large asteroid (category 3 and the fallback).
pub const LARGE_ASTEROID_SCALE: f32 = 0.12;

// ── Alien defaults ────────────────────────────────────────────────────────────

/// Default alien sprite scale.
pub const SOLDIER_DEFAULT_SCALE: f32 = 1.0;

/// Default alien speed (px/s) before viewport scaling.
pub const SOLDIER_DEFAULT_SPEED: f32 = 100.0;

/// Sprite scale applied to spawned alien soldiers.
pub const SOLDIER_SPAWN_SCALE: f32 = 0.1;

/// Sprite scale applied to spawned alien bosses.
pub const BOSS_SPAWN_SCALE: f32 = 0.2;

/// Projectile hits required to destroy a boss.
pub const BOSS_HITS_TO_DESTROY: u32 = 3;

/// Seconds a damaged enemy keeps its hit tint.
pub const HIT_FEEDBACK_SECS: f32 = 0.2;

/// Collider radius of an enemy sprite in unscaled texture pixels.
///
/// Rapier scales the collider with the entity transform, so this is the
/// radius of the artwork itself.
pub const ENEMY_SPRITE_RADIUS: f32 = 250.0;

// ── Earth ─────────────────────────────────────────────────────────────────────

/// Earth sprite scale is `min(width, height) / EARTH_SCALE_DIVISOR`.
pub const EARTH_SCALE_DIVISOR: f32 = 1000.0;

/// Glow sprite scale is `min(width, height) / GLOW_SCALE_DIVISOR`.
pub const GLOW_SCALE_DIVISOR: f32 = 500.0;

/// Glow sprite alpha.
pub const GLOW_ALPHA: f32 = 0.1;

/// Fatal contact radius as a fraction of `min(width, height)`.
pub const EARTH_RADIUS_FRACTION: f32 = 0.08;

/// Shield radius as a fraction of `min(width, height)`; inside the fatal radius.
pub const SHIELD_RADIUS_FRACTION: f32 = 0.06;

// ── Player ────────────────────────────────────────────────────────────────────

/// Distance (px) from Earth's centre at which the ship orbits.
pub const ORBIT_RADIUS: f32 = 200.0;

/// Ship sprite scale.
pub const SHIP_SCALE: f32 = 0.5;

/// Projectile speed (px/s).
pub const PROJECTILE_SPEED: f32 = 600.0;

/// Seconds between consecutive shots.
pub const FIRE_COOLDOWN: f32 = 0.15;

/// Seconds before an unspent projectile is removed.
pub const PROJECTILE_LIFETIME: f32 = 3.0;

/// Projectile collider radius (px).
pub const PROJECTILE_COLLIDER_RADIUS: f32 = 4.0;

/// Maximum number of live projectiles; extra fire requests are dropped.
pub const MAX_PROJECTILES: usize = 10;

// ── Session ───────────────────────────────────────────────────────────────────

/// Seconds between the game-over trigger and the full restart.
pub const RESTART_DELAY_SECS: f32 = 5.0;

/// Lowest score the session may hold.
pub const SCORE_FLOOR: i32 = 0;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const SCORE_SMALL_ASTEROID: i32 = 1;
pub const SCORE_MEDIUM_ASTEROID: i32 = 3;
pub const SCORE_LARGE_ASTEROID: i32 = 5;
pub const SCORE_ALIEN_SOLDIER: i32 = 10;
pub const SCORE_ALIEN_BOSS: i32 = 20;

/// Applied when a small asteroid is absorbed by the glow shield.
pub const SCORE_SHIELD_PENALTY: i32 = -1;

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Background music volume (linear).
pub const MUSIC_VOLUME: f32 = 0.5;

/// Game-over cue volume (linear).
pub const GAME_OVER_CUE_VOLUME: f32 = 0.8;

// ── HUD ───────────────────────────────────────────────────────────────────────

pub const HUD_FONT_SIZE: f32 = 22.0;

/// Start button edge length as a fraction of `min(width, height)`.
pub const START_BUTTON_FRACTION: f32 = 0.2;

/// Start button growth while hovered.
pub const START_BUTTON_HOVER_GROWTH: f32 = 2500.0 / 2300.0;
