//! The defended Earth: scene setup, resize handling and contact rules.
//!
//! Earth sits at the world origin (the viewport centre).  Two radii around it
//! drive the end-of-session rules:
//!
//! | Enemy                                   | Inside fatal radius | Inside shield radius |
//! |-----------------------------------------|---------------------|----------------------|
//! | Medium/large asteroid, soldier, boss    | game over           | n/a                  |
//! | Small asteroid, glow shield enabled     | ignored             | absorbed, penalty    |
//! | Small asteroid, glow shield disabled    | game over           | n/a                  |

use crate::config::GameConfig;
use crate::constants::{EARTH_SCALE_DIVISOR, GLOW_ALPHA, GLOW_SCALE_DIVISOR};
use crate::enemy::{Enemy, EnemyKind};
use crate::session::{despawn_session_scoped_system, Session, SessionPhase, SessionScoped};
use crate::viewport::Viewport;
use bevy::prelude::*;

pub struct EarthPlugin;

impl Plugin for EarthPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(SessionPhase::NotStarted),
            setup_earth_scene.after(despawn_session_scoped_system),
        )
        .add_systems(Update, earth_resize_system)
        // After spawning so a fresh enemy is judged in its first frame.
        .add_systems(
            Update,
            earth_contact_system
                .after(crate::enemy::enemy_spawn_system)
                .run_if(in_state(SessionPhase::Running)),
        );
    }
}

// ── Components ────────────────────────────────────────────────────────────────

#[derive(Component)]
pub struct Earth;

/// Translucent glow drawn behind Earth.
#[derive(Component)]
pub struct Glow;

/// Full-screen space backdrop.
#[derive(Component)]
pub struct Background;

// ── Contact rules ─────────────────────────────────────────────────────────────

/// Contact radii around Earth's centre, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthRadii {
    pub fatal: f32,
    /// Present only when the glow shield is enabled.
    pub shield: Option<f32>,
}

impl EarthRadii {
    pub fn for_viewport(viewport: Viewport, config: &GameConfig) -> Self {
        let side = viewport.min_side();
        Self {
            fatal: side * config.earth_radius_fraction,
            shield: config
                .scenario
                .glow_shield
                .then(|| side * config.shield_radius_fraction),
        }
    }
}

/// What happens to an enemy at `distance` from Earth's centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarthContact {
    Clear,
    /// Small asteroid destroyed by the shield; session continues with a penalty.
    Absorbed,
    /// Earth is hit; the session ends.
    Fatal,
}

pub fn classify_earth_contact(kind: EnemyKind, distance: f32, radii: EarthRadii) -> EarthContact {
    if kind.is_small_asteroid() {
        if let Some(shield) = radii.shield {
            return if distance < shield {
                EarthContact::Absorbed
            } else {
                EarthContact::Clear
            };
        }
    }
    if distance < radii.fatal {
        EarthContact::Fatal
    } else {
        EarthContact::Clear
    }
}

// ── Scene setup ───────────────────────────────────────────────────────────────

fn earth_scale(viewport: Viewport) -> f32 {
    viewport.min_side() / EARTH_SCALE_DIVISOR
}

fn glow_scale(viewport: Viewport) -> f32 {
    viewport.min_side() / GLOW_SCALE_DIVISOR
}

/// `OnEnter(NotStarted)`: spawn backdrop, glow and Earth for a fresh session.
pub fn setup_earth_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    viewport: Res<Viewport>,
    config: Res<GameConfig>,
) {
    let vp = *viewport;

    commands.spawn((
        Background,
        SessionScoped,
        Sprite {
            image: asset_server.load("images/space.png"),
            custom_size: Some(Vec2::new(vp.width, vp.height)),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, 0.0, -10.0)),
    ));

    if config.scenario.glow_shield {
        commands.spawn((
            Glow,
            SessionScoped,
            Sprite {
                image: asset_server.load("images/glow.png"),
                color: Color::srgba(1.0, 1.0, 1.0, GLOW_ALPHA),
                ..default()
            },
            Transform::from_translation(Vec3::new(0.0, 0.0, -1.0))
                .with_scale(Vec3::splat(glow_scale(vp))),
        ));
    }

    commands.spawn((
        Earth,
        SessionScoped,
        Sprite::from_image(asset_server.load("images/earth.png")),
        Transform::from_translation(Vec3::ZERO).with_scale(Vec3::splat(earth_scale(vp))),
    ));
}

/// Re-centre and rescale the scene after a viewport change.
#[allow(clippy::type_complexity)]
pub fn earth_resize_system(
    viewport: Res<Viewport>,
    mut q_earth: Query<&mut Transform, (With<Earth>, Without<Glow>)>,
    mut q_glow: Query<&mut Transform, (With<Glow>, Without<Earth>)>,
    mut q_background: Query<&mut Sprite, With<Background>>,
) {
    if !viewport.is_changed() {
        return;
    }
    let vp = *viewport;
    for mut t in q_earth.iter_mut() {
        t.translation = Vec3::ZERO;
        t.scale = Vec3::splat(earth_scale(vp));
    }
    for mut t in q_glow.iter_mut() {
        t.translation.x = 0.0;
        t.translation.y = 0.0;
        t.scale = Vec3::splat(glow_scale(vp));
    }
    for mut sprite in q_background.iter_mut() {
        sprite.custom_size = Some(Vec2::new(vp.width, vp.height));
    }
}

// ── Contact evaluation ────────────────────────────────────────────────────────

/// Each frame, measure every enemy against Earth and apply the contact rules.
pub fn earth_contact_system(
    mut commands: Commands,
    mut session: ResMut<Session>,
    viewport: Res<Viewport>,
    config: Res<GameConfig>,
    q_earth: Query<&Transform, With<Earth>>,
    q_enemies: Query<(Entity, &Transform, &EnemyKind), With<Enemy>>,
) {
    if !session.is_running() {
        return;
    }
    let Ok(earth) = q_earth.single() else {
        return;
    };
    let centre = earth.translation.truncate();
    let radii = EarthRadii::for_viewport(*viewport, &config);

    for (entity, transform, kind) in q_enemies.iter() {
        let distance = transform.translation.truncate().distance(centre);
        match classify_earth_contact(*kind, distance, radii) {
            EarthContact::Clear => {}
            EarthContact::Absorbed => {
                commands.entity(entity).despawn();
                session.record_shield_absorb();
                debug!("Shield absorbed a small asteroid; score {}", session.score());
            }
            EarthContact::Fatal => {
                if session.trigger_game_over() {
                    info!("Game over: Earth hit by {kind:?}");
                }
                return;
            }
        }
    }
}
