//! Spawn placement: pick a perimeter point that keeps clear of live enemies.
//!
//! All coordinates here are *screen space* (top-left origin, y down).  Each
//! candidate lies [`EDGE_OFFSET`](crate::constants::EDGE_OFFSET) pixels
//! outside one edge of the viewport:
//!
//! | Zone        | Fixed axis       | Sampled axis        |
//! |-------------|------------------|---------------------|
//! | Top         | `y = -offset`    | `x ∈ [0, w]`        |
//! | Bottom      | `y = h + offset` | `x ∈ [0, w]`        |
//! | Left        | `x = -offset`    | `y ∈ [0, h]`        |
//! | Right       | `x = w + offset` | `y ∈ [0, h]`        |
//! | TopLeft     | `y = -offset`    | `x ∈ [0, w/4]`      |
//! | TopRight    | `y = -offset`    | `x ∈ [3w/4, w]`     |
//! | BottomLeft  | `y = h + offset` | `x ∈ [0, w/4]`      |
//! | BottomRight | `y = h + offset` | `x ∈ [3w/4, w]`     |
//!
//! A candidate is accepted when it is at least the minimum separation away
//! from every existing position.  Sampling is retried up to a fixed budget;
//! when the budget runs out the spawn cycle is skipped.

use crate::constants::{SEPARATION_DIVISOR, VIEWPORT_SCALE_REFERENCE};
use crate::error::{GameError, GameResult};
use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

/// Which set of perimeter zones spawns are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeLayout {
    /// The four edges, equally likely.
    #[default]
    Four,
    /// The four edges plus four corner sub-ranges, equally likely.
    Eight,
}

impl EdgeLayout {
    pub fn zones(self) -> &'static [SpawnZone] {
        match self {
            EdgeLayout::Four => &SpawnZone::EDGES,
            EdgeLayout::Eight => &SpawnZone::ALL,
        }
    }
}

/// One perimeter zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnZone {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl SpawnZone {
    pub const EDGES: [SpawnZone; 4] = [
        SpawnZone::Top,
        SpawnZone::Bottom,
        SpawnZone::Left,
        SpawnZone::Right,
    ];

    pub const ALL: [SpawnZone; 8] = [
        SpawnZone::Top,
        SpawnZone::Bottom,
        SpawnZone::Left,
        SpawnZone::Right,
        SpawnZone::TopLeft,
        SpawnZone::TopRight,
        SpawnZone::BottomLeft,
        SpawnZone::BottomRight,
    ];

    /// Sample a point uniformly along this zone.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R, width: f32, height: f32, offset: f32) -> Vec2 {
        let quarter = width / 4.0;
        match self {
            SpawnZone::Top => Vec2::new(uniform(rng, 0.0, width), -offset),
            SpawnZone::Bottom => Vec2::new(uniform(rng, 0.0, width), height + offset),
            SpawnZone::Left => Vec2::new(-offset, uniform(rng, 0.0, height)),
            SpawnZone::Right => Vec2::new(width + offset, uniform(rng, 0.0, height)),
            SpawnZone::TopLeft => Vec2::new(uniform(rng, 0.0, quarter), -offset),
            SpawnZone::TopRight => Vec2::new(uniform(rng, width - quarter, width), -offset),
            SpawnZone::BottomLeft => Vec2::new(uniform(rng, 0.0, quarter), height + offset),
            SpawnZone::BottomRight => {
                Vec2::new(uniform(rng, width - quarter, width), height + offset)
            }
        }
    }
}

/// Uniform sample in `[lo, hi]`; collapses to `lo` for an empty range so a
/// zero-sized viewport does not panic inside `gen_range`.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

/// Inputs of one placement query.
#[derive(Debug, Clone, Copy)]
pub struct SpawnRequest<'a> {
    pub width: f32,
    pub height: f32,
    /// Screen-space positions of the live enemies to keep clear of.
    pub existing: &'a [Vec2],
    pub min_separation: f32,
    /// Distance outside the viewport at which candidates are placed.
    pub edge_offset: f32,
}

impl<'a> SpawnRequest<'a> {
    /// A request with the standard separation and edge offset for a viewport.
    pub fn new(width: f32, height: f32, existing: &'a [Vec2], edge_offset: f32) -> Self {
        Self {
            width,
            height,
            existing,
            min_separation: min_separation(width, height),
            edge_offset,
        }
    }

    /// `true` if `candidate` keeps the minimum separation from every existing position.
    pub fn is_clear(&self, candidate: Vec2) -> bool {
        let min_sq = self.min_separation * self.min_separation;
        self.existing
            .iter()
            .all(|p| p.distance_squared(candidate) >= min_sq)
    }
}

/// Minimum spawn separation for a viewport: a twentieth of the short side.
pub fn min_separation(width: f32, height: f32) -> f32 {
    width.min(height) / SEPARATION_DIVISOR
}

/// Pick a perimeter position clear of `request.existing`.
///
/// Returns [`GameError::SpawnSaturated`] when `max_attempts` candidates in a
/// row are rejected.
pub fn pick_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    request: &SpawnRequest<'_>,
    layout: EdgeLayout,
    max_attempts: u32,
) -> GameResult<Vec2> {
    let zones = layout.zones();
    for _ in 0..max_attempts {
        let zone = zones[rng.gen_range(0..zones.len())];
        let candidate = zone.sample(rng, request.width, request.height, request.edge_offset);
        if request.is_clear(candidate) {
            return Ok(candidate);
        }
    }
    Err(GameError::SpawnSaturated {
        attempts: max_attempts,
    })
}

/// Enemy speed for a viewport: `base + U{0..=spread} · min(w, h) / 500`.
///
/// The random component scales with the viewport so enemies cross the screen
/// in roughly the same time at any resolution.
pub fn spawn_speed<R: Rng + ?Sized>(
    rng: &mut R,
    base: f32,
    spread: u32,
    width: f32,
    height: f32,
) -> f32 {
    let roll = rng.gen_range(0..=spread) as f32;
    base + roll * (width.min(height) / VIEWPORT_SCALE_REFERENCE)
}

/// Straight-line velocity from `from` toward `target` at `speed`.
pub fn velocity_toward(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    (target - from).normalize_or_zero() * speed
}
