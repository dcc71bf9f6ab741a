//! Score HUD.
//!
//! The HUD is spawned once at startup and survives restarts; it mirrors
//! [`Session::score`] whenever the session changes.

use crate::config::GameConfig;
use crate::session::Session;
use bevy::prelude::*;

/// Marker for the permanent score HUD node.
#[derive(Component)]
pub struct HudScoreDisplay;

pub fn score_label(score: i32) -> String {
    format!("Score: {score}")
}

/// Spawn the permanent top-left score HUD.
pub fn setup_hud_score(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            ZIndex(100),
            HudScoreDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(score_label(0)),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));
        });
}

/// Refresh the score HUD when the session changes.
pub fn hud_score_display_system(
    session: Res<Session>,
    parent_query: Query<&Children, With<HudScoreDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    if !session.is_changed() {
        return;
    }
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(score_label(session.score()));
            }
        }
    }
}
