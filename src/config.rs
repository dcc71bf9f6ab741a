//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the constants in
//! [`crate::constants`].  Before the app runs, [`read_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file; [`install_game_config`] then inserts the result.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! restart_delay_secs = 6.0
//!
//! [scenario]
//! bosses = false
//! edge_layout = "eight"
//!
//! [scenario.scoring]
//! soldier = 15
//! ```
//!
//! The [`ScenarioConfig`] table selects which enemy kinds and features a game
//! session enables; each game mode is one combination of these switches.

use crate::constants::*;
use crate::enemy::placement::EdgeLayout;
use crate::error::{require_non_negative, require_positive, GameError, GameResult};
use crate::session::{ScoringTable, Session};
use bevy::prelude::*;
use serde::Deserialize;

/// Which enemy kinds and rule variants a session enables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub asteroids: bool,
    pub soldiers: bool,
    pub bosses: bool,
    /// Small asteroids are absorbed by an inner glow shield (with a score
    /// penalty) instead of ending the session.
    pub glow_shield: bool,
    pub edge_layout: EdgeLayout,
    pub boss_hits: u32,
    /// When `false`, spawn separation is only checked against enemies of the
    /// same group (asteroids, soldiers, bosses).
    pub separate_across_groups: bool,
    pub asteroid_spawn_interval: f32,
    pub soldier_spawn_interval: f32,
    pub boss_spawn_interval: f32,
    pub scoring: ScoringTable,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            asteroids: true,
            soldiers: true,
            bosses: true,
            glow_shield: true,
            edge_layout: EdgeLayout::Four,
            boss_hits: BOSS_HITS_TO_DESTROY,
            separate_across_groups: false,
            asteroid_spawn_interval: ASTEROID_SPAWN_INTERVAL,
            soldier_spawn_interval: SOLDIER_SPAWN_INTERVAL,
            boss_spawn_interval: BOSS_SPAWN_INTERVAL,
            scoring: ScoringTable::default(),
        }
    }
}

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Spawn placement ───────────────────────────────────────────────────────
    pub edge_offset: f32,
    pub max_spawn_attempts: u32,
    pub enemy_base_speed: f32,
    pub enemy_speed_spread: u32,
    pub enemy_angular_velocity_deg: f32,
    pub soldier_spawn_scale: f32,
    pub boss_spawn_scale: f32,
    pub enemy_sprite_radius: f32,
    pub hit_feedback_secs: f32,

    // ── Earth ─────────────────────────────────────────────────────────────────
    pub earth_radius_fraction: f32,
    pub shield_radius_fraction: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub orbit_radius: f32,
    pub ship_scale: f32,
    pub projectile_speed: f32,
    pub fire_cooldown: f32,
    pub projectile_lifetime: f32,
    pub projectile_collider_radius: f32,
    pub max_projectiles: usize,

    // ── Session ───────────────────────────────────────────────────────────────
    pub restart_delay_secs: f32,
    pub score_floor: i32,

    // ── Audio / HUD ───────────────────────────────────────────────────────────
    pub music_volume: f32,
    pub game_over_cue_volume: f32,
    pub hud_font_size: f32,

    pub scenario: ScenarioConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            edge_offset: EDGE_OFFSET,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_spread: ENEMY_SPEED_SPREAD,
            enemy_angular_velocity_deg: ENEMY_ANGULAR_VELOCITY_DEG,
            soldier_spawn_scale: SOLDIER_SPAWN_SCALE,
            boss_spawn_scale: BOSS_SPAWN_SCALE,
            enemy_sprite_radius: ENEMY_SPRITE_RADIUS,
            hit_feedback_secs: HIT_FEEDBACK_SECS,
            earth_radius_fraction: EARTH_RADIUS_FRACTION,
            shield_radius_fraction: SHIELD_RADIUS_FRACTION,
            orbit_radius: ORBIT_RADIUS,
            ship_scale: SHIP_SCALE,
            projectile_speed: PROJECTILE_SPEED,
            fire_cooldown: FIRE_COOLDOWN,
            projectile_lifetime: PROJECTILE_LIFETIME,
            projectile_collider_radius: PROJECTILE_COLLIDER_RADIUS,
            max_projectiles: MAX_PROJECTILES,
            restart_delay_secs: RESTART_DELAY_SECS,
            score_floor: SCORE_FLOOR,
            music_volume: MUSIC_VOLUME,
            game_over_cue_volume: GAME_OVER_CUE_VOLUME,
            hud_font_size: HUD_FONT_SIZE,
            scenario: ScenarioConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reject values the game cannot run with.
    ///
    /// Ranges are not checked on builder inputs; this only guards the values
    /// that drive timers, radii and the spawn loop.
    pub fn validate(&self) -> GameResult<()> {
        require_non_negative("edge_offset", self.edge_offset)?;
        require_positive("orbit_radius", self.orbit_radius)?;
        require_positive("projectile_speed", self.projectile_speed)?;
        require_non_negative("fire_cooldown", self.fire_cooldown)?;
        require_positive("projectile_lifetime", self.projectile_lifetime)?;
        require_non_negative("restart_delay_secs", self.restart_delay_secs)?;
        require_positive("earth_radius_fraction", self.earth_radius_fraction)?;
        require_positive("shield_radius_fraction", self.shield_radius_fraction)?;
        require_positive(
            "asteroid_spawn_interval",
            self.scenario.asteroid_spawn_interval,
        )?;
        require_positive(
            "soldier_spawn_interval",
            self.scenario.soldier_spawn_interval,
        )?;
        require_positive("boss_spawn_interval", self.scenario.boss_spawn_interval)?;
        if self.max_spawn_attempts == 0 {
            return Err(GameError::InvalidConfig {
                name: "max_spawn_attempts",
                value: 0.0,
                expected: "[1, ∞)",
            });
        }
        if self.scenario.boss_hits == 0 {
            return Err(GameError::InvalidConfig {
                name: "scenario.boss_hits",
                value: 0.0,
                expected: "[1, ∞)",
            });
        }
        Ok(())
    }
}

/// Parse and validate a TOML document into a [`GameConfig`].
pub fn parse_game_config(contents: &str) -> Result<GameConfig, String> {
    let config = toml::from_str::<GameConfig>(contents).map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Location of the optional configuration file, relative to the working directory.
pub const GAME_CONFIG_PATH: &str = "assets/game.toml";

/// Read the configuration file at `path`.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are logged and fall back to the defaults.  A missing file is not an error.
pub fn read_game_config(path: &str) -> GameConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match parse_game_config(&contents) {
            Ok(loaded) => {
                info!("Loaded game config from {path}");
                loaded
            }
            Err(e) => {
                warn!("Failed to load {path}: {e}; using defaults");
                GameConfig::default()
            }
        },
        Err(_) => {
            info!("No {path} found; using compiled defaults");
            GameConfig::default()
        }
    }
}

/// Insert `config` and the session rules derived from it.
///
/// Must be called before the first `app.update()`: the initial
/// `OnEnter(NotStarted)` scene is built by the first state transition, which
/// runs ahead of every startup schedule.
pub fn install_game_config(app: &mut App, config: GameConfig) {
    app.insert_resource(Session::from_config(&config))
        .insert_resource(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = parse_game_config(
            r#"
            restart_delay_secs = 6.0

            [scenario]
            bosses = false
            edge_layout = "eight"

            [scenario.scoring]
            soldier = 15
            "#,
        )
        .unwrap();

        assert_eq!(cfg.restart_delay_secs, 6.0);
        assert!(!cfg.scenario.bosses);
        assert!(cfg.scenario.asteroids);
        assert_eq!(cfg.scenario.edge_layout, EdgeLayout::Eight);
        assert_eq!(cfg.scenario.scoring.soldier, 15);
        assert_eq!(cfg.scenario.scoring.boss, SCORE_ALIEN_BOSS);
        assert_eq!(cfg.max_projectiles, MAX_PROJECTILES);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = parse_game_config("orbit_radius = -5.0").unwrap_err();
        assert!(err.contains("orbit_radius"));

        let err = parse_game_config("[scenario]\nboss_hits = 0").unwrap_err();
        assert!(err.contains("boss_hits"));
    }

    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "earth-defense-{}-{name}.toml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn read_config_from_file() {
        let path = temp_config("read", "orbit_radius = 150.0\n[scenario]\nglow_shield = false\n");
        let cfg = read_game_config(path.to_str().unwrap());
        assert_eq!(cfg.orbit_radius, 150.0);
        assert!(!cfg.scenario.glow_shield);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn unreadable_or_invalid_file_falls_back_to_defaults() {
        let missing = read_game_config("assets/does-not-exist.toml");
        assert_eq!(missing.orbit_radius, ORBIT_RADIUS);

        let path = temp_config("invalid", "orbit_radius = -1.0\n");
        let cfg = read_game_config(path.to_str().unwrap());
        assert_eq!(cfg.orbit_radius, ORBIT_RADIUS);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn install_applies_rules_to_session() {
        let mut cfg = GameConfig::default();
        cfg.restart_delay_secs = 2.0;
        cfg.score_floor = -10;
        let mut app = App::new();
        install_game_config(&mut app, cfg);

        {
            let mut session = app.world_mut().resource_mut::<Session>();
            session.start();
            session.record_shield_absorb();
            assert_eq!(session.score(), -1);
            session.trigger_game_over();
            assert_eq!(session.restart_remaining(), Some(2.0));
        }
        assert_eq!(app.world().resource::<GameConfig>().score_floor, -10);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_game_config("restart_delay_secs = \"soon\"").is_err());
    }
}
