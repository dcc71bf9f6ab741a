//! Game-specific error types.
//!
//! Systems propagate failures through these types instead of panicking, so a
//! bad spawn cycle or a half-initialised scene degrades to a skipped action
//! with a log line rather than a crash.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::error::{GameError, GameResult};
//!
//! fn spawn_cycle() -> GameResult<()> {
//!     let position = pick_spawn_position(&mut rng, &request, layout, attempts)?;
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The engine collaborator needed to realize an entity is missing or has
    /// no physics backend.  Fatal to that realization; never retried.
    MissingCollaborator {
        /// Human-readable description of what was being realized.
        context: &'static str,
    },

    /// Spawn placement gave up because no candidate kept the minimum
    /// separation from the live enemies.  The caller skips the spawn cycle.
    SpawnSaturated {
        /// Number of candidates rejected before giving up.
        attempts: u32,
    },

    /// A configuration value is outside the range the game can run with.
    InvalidConfig {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::MissingCollaborator { context } => write!(
                f,
                "cannot realize {}: scene is not initialised or has no physics backend",
                context
            ),
            GameError::SpawnSaturated { attempts } => write!(
                f,
                "no spawn position kept the minimum separation after {} attempts",
                attempts
            ),
            GameError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn require_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is zero or positive.
pub fn require_non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "[0.0, ∞)",
        })
    }
}
