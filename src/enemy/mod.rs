//! Enemies: descriptors, builders, spawn placement, realization and the
//! systems that spawn and damage them.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`descriptor`] | `EnemyKind`, `SizeCategory`, `EnemyDescriptor` |
//! | [`builders`] | `AsteroidBuilder`, `AlienSoldierBuilder` |
//! | [`placement`] | Perimeter spawn placement with minimum separation |
//! | [`realize`] | `EnemyRealizer` seam and the Bevy/Rapier realizer |
//!
//! Spawning runs on one repeating timer per enabled kind while the session is
//! `Running`.  Timers are reset on every `OnEnter(Running)`, so a restart
//! implicitly cancels the previous session's spawn streams.

pub mod builders;
pub mod descriptor;
pub mod placement;
pub mod realize;

pub use builders::{AlienSoldierBuilder, AsteroidBuilder};
pub use descriptor::{EnemyDescriptor, EnemyGroup, EnemyKind, SizeCategory};
pub use placement::{pick_spawn_position, EdgeLayout, SpawnRequest, SpawnZone};
pub use realize::{realize_enemy, EnemyRealizer, SceneRealizer};

use crate::config::GameConfig;
use crate::earth::Earth;
use crate::error::GameError;
use crate::session::SessionPhase;
use crate::viewport::Viewport;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

// ── Components ────────────────────────────────────────────────────────────────

/// Marker for every live enemy entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

/// Projectile hits left before the enemy is destroyed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitPoints(pub u32);

/// Transient tint after a non-lethal hit.  Purely visual.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitFeedback {
    pub remaining_secs: f32,
}

/// Result of one projectile hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Hit points reached zero; the enemy must be destroyed and scored.
    Destroyed,
    /// Still alive with this many hit points left.
    Damaged { remaining: u32 },
}

impl HitPoints {
    /// Register one hit.
    pub fn register_hit(&mut self) -> HitOutcome {
        self.0 = self.0.saturating_sub(1);
        if self.0 == 0 {
            HitOutcome::Destroyed
        } else {
            HitOutcome::Damaged { remaining: self.0 }
        }
    }
}

// ── Spawn timers ──────────────────────────────────────────────────────────────

/// One repeating timer per enemy kind.
#[derive(Resource, Debug, Clone)]
pub struct EnemySpawnTimers {
    pub asteroid: Timer,
    pub soldier: Timer,
    pub boss: Timer,
    /// Enemies realized in the current session.
    pub spawned: u64,
}

impl EnemySpawnTimers {
    pub fn from_config(config: &GameConfig) -> Self {
        let s = &config.scenario;
        Self {
            asteroid: Timer::from_seconds(s.asteroid_spawn_interval, TimerMode::Repeating),
            soldier: Timer::from_seconds(s.soldier_spawn_interval, TimerMode::Repeating),
            boss: Timer::from_seconds(s.boss_spawn_interval, TimerMode::Repeating),
            spawned: 0,
        }
    }
}

impl Default for EnemySpawnTimers {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemySpawnTimers>()
            .add_systems(OnEnter(SessionPhase::Running), reset_spawn_timers_system)
            .add_systems(
                Update,
                (enemy_spawn_system, hit_feedback_system)
                    .chain()
                    .run_if(in_state(SessionPhase::Running)),
            );
    }
}

/// Restart every spawn stream from zero.
pub fn reset_spawn_timers_system(config: Res<GameConfig>, mut timers: ResMut<EnemySpawnTimers>) {
    *timers = EnemySpawnTimers::from_config(&config);
}

/// Build the descriptor for a newly placed enemy of `group`.
///
/// `position` and `target` are screen space; `speed` is already viewport scaled.
/// An enemy placed exactly on its target gets no velocity.
pub fn spawn_descriptor<R: Rng + ?Sized>(
    rng: &mut R,
    group: EnemyGroup,
    position: Vec2,
    target: Vec2,
    speed: f32,
    config: &GameConfig,
) -> EnemyDescriptor {
    let velocity = placement::velocity_toward(position, target, speed);
    let (speed, heading) = (velocity.length(), velocity.to_angle());
    let spin = config.enemy_angular_velocity_deg;
    match group {
        EnemyGroup::Asteroids => AsteroidBuilder::new()
            .size(rng.gen_range(1..=3))
            .position(position.x, position.y)
            .velocity(speed, heading)
            .angular_velocity(spin)
            .build(),
        EnemyGroup::Soldiers => AlienSoldierBuilder::new()
            .position(position.x, position.y)
            .scale(config.soldier_spawn_scale)
            .speed(speed)
            .heading(heading)
            .angular_velocity(spin)
            .build(),
        EnemyGroup::Bosses => AlienSoldierBuilder::boss()
            .position(position.x, position.y)
            .scale(config.boss_spawn_scale)
            .speed(speed)
            .health(config.scenario.boss_hits)
            .heading(heading)
            .angular_velocity(spin)
            .build(),
    }
}

/// Screen positions a new enemy of `group` must keep clear of.
///
/// Only the same group counts unless `across_groups` is set.
pub fn separation_anchors(
    enemies: impl IntoIterator<Item = (Vec2, EnemyKind)>,
    group: EnemyGroup,
    across_groups: bool,
) -> Vec<Vec2> {
    enemies
        .into_iter()
        .filter(|(_, kind)| across_groups || kind.group() == group)
        .map(|(p, _)| p)
        .collect()
}

/// Tick the spawn timers and place + realize one enemy per finished timer.
///
/// A spawn cycle whose placement saturates is skipped; a realization failure
/// is logged and also skips the cycle.
#[allow(clippy::too_many_arguments)]
pub fn enemy_spawn_system(
    mut commands: Commands,
    time: Res<Time>,
    mut timers: ResMut<EnemySpawnTimers>,
    config: Res<GameConfig>,
    viewport: Res<Viewport>,
    asset_server: Res<AssetServer>,
    q_enemies: Query<(&Transform, &EnemyKind), With<Enemy>>,
    q_earth: Query<&Transform, With<Earth>>,
    q_physics: Query<(), With<RapierConfiguration>>,
) {
    let scenario = &config.scenario;
    let mut due = Vec::with_capacity(3);
    let delta = time.delta();
    if timers.asteroid.tick(delta).just_finished() && scenario.asteroids {
        due.push(EnemyGroup::Asteroids);
    }
    if timers.soldier.tick(delta).just_finished() && scenario.soldiers {
        due.push(EnemyGroup::Soldiers);
    }
    if timers.boss.tick(delta).just_finished() && scenario.bosses {
        due.push(EnemyGroup::Bosses);
    }
    if due.is_empty() {
        return;
    }

    let vp = *viewport;
    let target = q_earth
        .single()
        .map(|t| vp.world_to_screen(t.translation.truncate()))
        .unwrap_or_else(|_| vp.screen_center());

    let mut realizer = SceneRealizer {
        commands: &mut commands,
        asset_server: &asset_server,
        viewport: vp,
        sprite_radius: config.enemy_sprite_radius,
        physics: !q_physics.is_empty(),
    };
    let mut rng = rand::thread_rng();

    for group in due {
        // Only enemies alive at the start of this tick are considered.
        let existing = separation_anchors(
            q_enemies
                .iter()
                .map(|(t, kind)| (vp.world_to_screen(t.translation.truncate()), *kind)),
            group,
            scenario.separate_across_groups,
        );

        let request = SpawnRequest::new(vp.width, vp.height, &existing, config.edge_offset);
        let position = match pick_spawn_position(
            &mut rng,
            &request,
            scenario.edge_layout,
            config.max_spawn_attempts,
        ) {
            Ok(p) => p,
            Err(e @ GameError::SpawnSaturated { .. }) => {
                debug!("Skipping {group:?} spawn: {e}");
                continue;
            }
            Err(e) => {
                warn!("Skipping {group:?} spawn: {e}");
                continue;
            }
        };

        let speed = placement::spawn_speed(
            &mut rng,
            config.enemy_base_speed,
            config.enemy_speed_spread,
            vp.width,
            vp.height,
        );
        let descriptor = spawn_descriptor(&mut rng, group, position, target, speed, &config);

        match realize_enemy(&mut realizer, &descriptor) {
            Ok(_) => timers.spawned += 1,
            Err(e) => error!("{e}"),
        }
    }
}

/// Tint damaged enemies until their feedback window runs out.
pub fn hit_feedback_system(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut HitFeedback, &mut Sprite), With<Enemy>>,
) {
    let dt = time.delta_secs();
    for (entity, mut feedback, mut sprite) in q.iter_mut() {
        feedback.remaining_secs -= dt;
        if feedback.remaining_secs <= 0.0 {
            sprite.color = Color::WHITE;
            commands.entity(entity).remove::<HitFeedback>();
        } else {
            sprite.color = Color::srgb(1.0, 0.35, 0.35);
        }
    }
}
