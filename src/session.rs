//! Game session: phase state machine, score and the delayed restart.
//!
//! ## Phases
//!
//! | Phase        | Description                                              |
//! |--------------|----------------------------------------------------------|
//! | `NotStarted` | Start button shown; steering and firing ignored          |
//! | `Running`    | Enemies spawn, the ship steers and fires, score accrues  |
//! | `GameOver`   | Earth was hit; score reset, restart countdown running    |
//!
//! `NotStarted → Running → GameOver → (delay) → NotStarted`.  The last step is
//! a full restart: every [`SessionScoped`] entity is despawned and the scene
//! is rebuilt by the `OnEnter(NotStarted)` systems.
//!
//! [`Session`] is the source of truth.  Gameplay systems mutate it directly and
//! [`sync_session_phase_system`] mirrors its phase into Bevy's
//! [`State<SessionPhase>`] so `OnEnter`/`OnExit` schedules and `in_state` run
//! conditions follow along one frame later.

use crate::config::GameConfig;
use crate::constants::*;
use crate::enemy::{EnemyKind, SizeCategory};
use bevy::prelude::*;
use serde::Deserialize;

// ── Phase ─────────────────────────────────────────────────────────────────────

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

/// Marks entities that belong to one session and are discarded on restart.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SessionScoped;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Points awarded per destroyed enemy, plus the shield penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoringTable {
    pub small: i32,
    pub medium: i32,
    pub large: i32,
    pub soldier: i32,
    pub boss: i32,
    /// Applied when the glow shield absorbs a small asteroid (negative).
    pub shield_penalty: i32,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            small: SCORE_SMALL_ASTEROID,
            medium: SCORE_MEDIUM_ASTEROID,
            large: SCORE_LARGE_ASTEROID,
            soldier: SCORE_ALIEN_SOLDIER,
            boss: SCORE_ALIEN_BOSS,
            shield_penalty: SCORE_SHIELD_PENALTY,
        }
    }
}

impl ScoringTable {
    pub fn reward(&self, kind: EnemyKind) -> i32 {
        match kind {
            EnemyKind::Asteroid {
                size: SizeCategory::Small,
            } => self.small,
            EnemyKind::Asteroid {
                size: SizeCategory::Medium,
            } => self.medium,
            EnemyKind::Asteroid {
                size: SizeCategory::Large,
            } => self.large,
            EnemyKind::AlienSoldier => self.soldier,
            EnemyKind::AlienBoss => self.boss,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Session state shared by every gameplay system.
#[derive(Resource, Debug, Clone)]
pub struct Session {
    phase: SessionPhase,
    score: i32,
    /// Set once per session by [`Session::trigger_game_over`].
    game_over: bool,
    /// Seconds until the full restart; `Some` only during `GameOver`.
    restart_in: Option<f32>,
    scoring: ScoringTable,
    score_floor: i32,
    restart_delay: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ScoringTable::default(), SCORE_FLOOR, RESTART_DELAY_SECS)
    }
}

impl Session {
    pub fn new(scoring: ScoringTable, score_floor: i32, restart_delay: f32) -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            score: 0,
            game_over: false,
            restart_in: None,
            scoring,
            score_floor,
            restart_delay,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.scenario.scoring,
            config.score_floor,
            config.restart_delay_secs,
        )
    }

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Steering input is only honoured while running.
    #[inline]
    pub fn can_steer(&self) -> bool {
        self.is_running()
    }

    /// Fire requests are only honoured while running.
    #[inline]
    pub fn can_fire(&self) -> bool {
        self.is_running()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Seconds left before the restart, while one is pending.
    pub fn restart_remaining(&self) -> Option<f32> {
        self.restart_in
    }

    pub fn scoring(&self) -> &ScoringTable {
        &self.scoring
    }

    /// `NotStarted → Running`.  Returns `false` from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::NotStarted {
            return false;
        }
        self.phase = SessionPhase::Running;
        true
    }

    /// Award the reward for a destroyed enemy.  Returns the applied delta, or
    /// `None` when the session is not running.
    pub fn record_destroyed(&mut self, kind: EnemyKind) -> Option<i32> {
        if !self.is_running() {
            return None;
        }
        let delta = self.scoring.reward(kind);
        Some(self.apply_delta(delta))
    }

    /// Apply the shield penalty for an absorbed small asteroid.
    pub fn record_shield_absorb(&mut self) -> Option<i32> {
        if !self.is_running() {
            return None;
        }
        let delta = self.scoring.shield_penalty;
        Some(self.apply_delta(delta))
    }

    /// Add `delta`, clamped at the score floor.  Returns the change actually applied.
    fn apply_delta(&mut self, delta: i32) -> i32 {
        let before = self.score;
        self.score = self.score.saturating_add(delta).max(self.score_floor);
        self.score - before
    }

    /// `Running → GameOver`: resets the score and schedules the restart.
    ///
    /// Returns `true` only for the first call in a session; repeated fatal
    /// contacts before the restart are ignored.
    pub fn trigger_game_over(&mut self) -> bool {
        if self.game_over || self.phase != SessionPhase::Running {
            return false;
        }
        self.game_over = true;
        self.phase = SessionPhase::GameOver;
        self.score = 0;
        self.restart_in = Some(self.restart_delay);
        true
    }

    /// Advance the restart countdown.  Returns `true` on the tick that
    /// performs the restart.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.restart_in.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining > 0.0 {
            return false;
        }
        self.reset();
        true
    }

    /// Back to a fresh `NotStarted` session, keeping the rules.
    pub fn reset(&mut self) {
        *self = Self::new(self.scoring, self.score_floor, self.restart_delay);
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers [`SessionPhase`], the [`Session`] resource, the restart countdown
/// and the restart cleanup.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SessionPhase>()
            .init_resource::<Session>()
            .add_systems(
                OnEnter(SessionPhase::NotStarted),
                despawn_session_scoped_system,
            )
            .add_systems(Update, session_restart_countdown_system)
            .add_systems(Last, sync_session_phase_system);
    }
}

/// Count down to the restart while in `GameOver`.
pub fn session_restart_countdown_system(time: Res<Time>, mut session: ResMut<Session>) {
    if session.restart_remaining().is_none() {
        return;
    }
    if session.tick(time.delta_secs()) {
        info!("Restarting session");
    }
}

/// Mirror [`Session::phase`] into Bevy's state machine.
pub fn sync_session_phase_system(
    session: Res<Session>,
    state: Res<State<SessionPhase>>,
    mut next: ResMut<NextState<SessionPhase>>,
) {
    if *state.get() != session.phase() {
        next.set(session.phase());
    }
}

/// Full restart: discard everything that belonged to the previous session.
pub fn despawn_session_scoped_system(
    mut commands: Commands,
    query: Query<Entity, With<SessionScoped>>,
) {
    let mut count = 0usize;
    for entity in query.iter() {
        commands.entity(entity).despawn();
        count += 1;
    }
    if count > 0 {
        debug!("Despawned {count} session entities");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> EnemyKind {
        EnemyKind::Asteroid {
            size: SizeCategory::Small,
        }
    }

    fn running() -> Session {
        let mut s = Session::default();
        assert!(s.start());
        s
    }

    #[test]
    fn new_session_ignores_player_actions() {
        let s = Session::default();
        assert_eq!(s.phase(), SessionPhase::NotStarted);
        assert!(!s.can_steer());
        assert!(!s.can_fire());
    }

    #[test]
    fn start_only_from_not_started() {
        let mut s = Session::default();
        assert!(s.start());
        assert!(s.can_fire());
        assert!(!s.start());
        assert_eq!(s.phase(), SessionPhase::Running);
    }

    #[test]
    fn scoring_sequence_sums_rewards() {
        let mut s = running();
        s.record_destroyed(small());
        s.record_destroyed(EnemyKind::Asteroid {
            size: SizeCategory::Medium,
        });
        s.record_destroyed(EnemyKind::Asteroid {
            size: SizeCategory::Large,
        });
        s.record_destroyed(EnemyKind::AlienSoldier);
        assert_eq!(s.score(), 1 + 3 + 5 + 10);
        s.record_destroyed(EnemyKind::AlienBoss);
        assert_eq!(s.score(), 39);
    }

    #[test]
    fn destroy_before_start_scores_nothing() {
        let mut s = Session::default();
        assert_eq!(s.record_destroyed(EnemyKind::AlienBoss), None);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn shield_penalty_respects_floor() {
        let mut s = running();
        assert_eq!(s.record_shield_absorb(), Some(0));
        assert_eq!(s.score(), 0);

        s.record_destroyed(EnemyKind::Asteroid {
            size: SizeCategory::Medium,
        });
        assert_eq!(s.record_shield_absorb(), Some(-1));
        assert_eq!(s.score(), 2);
    }

    #[test]
    fn custom_floor_allows_negative_scores() {
        let mut s = Session::new(ScoringTable::default(), -2, 5.0);
        s.start();
        for _ in 0..5 {
            s.record_shield_absorb();
        }
        assert_eq!(s.score(), -2);
    }

    #[test]
    fn game_over_is_idempotent() {
        let mut s = running();
        s.record_destroyed(EnemyKind::AlienSoldier);

        assert!(s.trigger_game_over());
        assert_eq!(s.score(), 0);
        assert_eq!(s.restart_remaining(), Some(RESTART_DELAY_SECS));

        s.tick(1.0);
        assert!(!s.trigger_game_over());
        assert_eq!(s.restart_remaining(), Some(RESTART_DELAY_SECS - 1.0));
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn game_over_freezes_score() {
        let mut s = running();
        s.trigger_game_over();
        assert_eq!(s.record_destroyed(EnemyKind::AlienBoss), None);
        assert_eq!(s.record_shield_absorb(), None);
        assert_eq!(s.score(), 0);
        assert!(!s.can_fire());
    }

    #[test]
    fn game_over_requires_running_session() {
        let mut s = Session::default();
        assert!(!s.trigger_game_over());
        assert_eq!(s.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn restart_fires_once_after_delay() {
        let mut s = running();
        s.trigger_game_over();

        assert!(!s.tick(RESTART_DELAY_SECS - 0.5));
        assert!(s.tick(0.5));
        assert_eq!(s.phase(), SessionPhase::NotStarted);
        assert!(!s.is_game_over());
        assert_eq!(s.restart_remaining(), None);
        assert!(!s.tick(10.0));

        // A new session can start and end again.
        assert!(s.start());
        assert!(s.trigger_game_over());
    }
}
