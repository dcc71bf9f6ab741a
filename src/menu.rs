//! Start button and game-over overlay.
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                          | Schedule                  | Purpose                           |
//! |---------------------------------|---------------------------|-----------------------------------|
//! | `setup_start_menu`              | `OnEnter(NotStarted)`     | Spawn the centred start button    |
//! | `cleanup_ui::<StartMenuRoot>`   | `OnExit(NotStarted)`      | Despawn the start overlay         |
//! | `setup_game_over`               | `OnEnter(GameOver)`       | Spawn the game-over card          |
//! | `cleanup_ui::<GameOverRoot>`    | `OnExit(GameOver)`        | Despawn the game-over card        |
//! | `start_button_system`           | `Update / in NotStarted`  | Hover growth; start on press      |
//! | `start_button_resize_system`    | `Update`                  | Follow viewport size changes      |
//! | `restart_countdown_text_system` | `Update / in GameOver`    | Refresh "Restarting in N s" text  |

use crate::config::GameConfig;
use crate::constants::{START_BUTTON_FRACTION, START_BUTTON_HOVER_GROWTH};
use crate::player::ShotStats;
use crate::session::{Session, SessionPhase};
use crate::viewport::Viewport;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

pub const START_BUTTON_IMAGE_PATH: &str = "images/start.png";

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the start overlay; despawned on `OnExit(NotStarted)`.
#[derive(Component)]
pub struct StartMenuRoot;

#[derive(Component)]
pub struct StartButton;

/// Root node of the game-over overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

#[derive(Component)]
pub struct RestartCountdownText;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(SessionPhase::NotStarted), setup_start_menu)
            .add_systems(OnExit(SessionPhase::NotStarted), cleanup_ui::<StartMenuRoot>)
            .add_systems(OnEnter(SessionPhase::GameOver), setup_game_over)
            .add_systems(OnExit(SessionPhase::GameOver), cleanup_ui::<GameOverRoot>)
            .add_systems(
                Update,
                (
                    start_button_system.run_if(in_state(SessionPhase::NotStarted)),
                    start_button_resize_system,
                    restart_countdown_text_system.run_if(in_state(SessionPhase::GameOver)),
                ),
            );
    }
}

// ── Sizing ────────────────────────────────────────────────────────────────────

/// Square start-button edge for the current viewport.
pub fn start_button_size(viewport: Viewport, hovered: bool) -> f32 {
    let base = viewport.min_side() * START_BUTTON_FRACTION;
    if hovered {
        base * START_BUTTON_HOVER_GROWTH
    } else {
        base
    }
}

fn set_square(node: &mut Node, edge: f32) {
    node.width = Val::Px(edge);
    node.height = Val::Px(edge);
}

fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}

fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

// ── OnEnter(NotStarted): start overlay ────────────────────────────────────────

pub fn setup_start_menu(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    viewport: Res<Viewport>,
) {
    let edge = start_button_size(*viewport, false);
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            StartMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Button,
                Node {
                    width: Val::Px(edge),
                    height: Val::Px(edge),
                    ..default()
                },
                ImageNode::new(asset_server.load(START_BUTTON_IMAGE_PATH)),
                StartButton,
            ));
        });
}

// ── OnEnter(GameOver): overlay card ───────────────────────────────────────────

/// Spawn the game-over card: title, restart countdown and shot totals.
pub fn setup_game_over(
    mut commands: Commands,
    session: Res<Session>,
    stats: Res<ShotStats>,
    config: Res<GameConfig>,
) {
    let remaining = session.restart_remaining().unwrap_or(0.0);
    let font_size = config.hud_font_size;
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            ZIndex(300),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(32.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.06, 0.02, 0.02)),
                    BorderColor::all(Color::srgb(0.55, 0.10, 0.10)),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("GAME OVER"),
                        TextFont {
                            font_size: font_size * 2.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.22, 0.22)),
                    ));

                    spacer(card, 12.0);

                    card.spawn((
                        Text::new(format!(
                            "{} shots · {} hits · {} destroyed · {:.0}% accuracy",
                            stats.fired,
                            stats.hits,
                            stats.destroyed,
                            stats.accuracy() * 100.0
                        )),
                        TextFont {
                            font_size: font_size * 0.75,
                            ..default()
                        },
                        TextColor(subtitle_color()),
                    ));

                    spacer(card, 8.0);

                    card.spawn((
                        Text::new(countdown_label(remaining)),
                        TextFont {
                            font_size,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        RestartCountdownText,
                    ));
                });
        });
}

fn countdown_label(remaining: f32) -> String {
    format!("Restarting in {} s", remaining.max(0.0).ceil() as u32)
}

// ── Cleanup ───────────────────────────────────────────────────────────────────

/// Recursively despawn every UI tree rooted at a `T` node.
pub fn cleanup_ui<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Grow the start button on hover and start the session on press.
pub fn start_button_system(
    mut q: Query<(&Interaction, &mut Node), (Changed<Interaction>, With<StartButton>)>,
    viewport: Res<Viewport>,
    mut session: ResMut<Session>,
) {
    for (interaction, mut node) in q.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                if session.start() {
                    info!("Session started");
                }
            }
            Interaction::Hovered => set_square(&mut node, start_button_size(*viewport, true)),
            Interaction::None => set_square(&mut node, start_button_size(*viewport, false)),
        }
    }
}

pub fn start_button_resize_system(
    viewport: Res<Viewport>,
    mut q: Query<(&mut Node, Option<&Interaction>), With<StartButton>>,
) {
    if !viewport.is_changed() {
        return;
    }
    for (mut node, interaction) in q.iter_mut() {
        let hovered = matches!(interaction, Some(Interaction::Hovered));
        set_square(&mut node, start_button_size(*viewport, hovered));
    }
}

pub fn restart_countdown_text_system(
    session: Res<Session>,
    mut q: Query<&mut Text, With<RestartCountdownText>>,
) {
    let Some(remaining) = session.restart_remaining() else {
        return;
    };
    for mut text in q.iter_mut() {
        *text = Text::new(countdown_label(remaining));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(Viewport::new(1000.0, 500.0));
        app.insert_resource(Session::default());
        app.add_systems(Update, start_button_system);
        app
    }

    #[test]
    fn button_size_follows_short_side() {
        let vp = Viewport::new(1000.0, 500.0);
        assert_eq!(start_button_size(vp, false), 500.0 * START_BUTTON_FRACTION);
        assert!(start_button_size(vp, true) > start_button_size(vp, false));
    }

    #[test]
    fn pressing_start_runs_the_session() {
        let mut app = button_app();
        app.world_mut()
            .spawn((StartButton, Interaction::Pressed, Node::default()));
        app.update();
        assert!(app.world().resource::<Session>().is_running());
    }

    #[test]
    fn hover_grows_button() {
        let mut app = button_app();
        let button = app
            .world_mut()
            .spawn((StartButton, Interaction::Hovered, Node::default()))
            .id();
        app.update();
        let node = app.world().get::<Node>(button).unwrap();
        assert_eq!(
            node.width,
            Val::Px(start_button_size(Viewport::new(1000.0, 500.0), true))
        );
        assert!(!app.world().resource::<Session>().is_running());
    }

    #[test]
    fn countdown_rounds_up_whole_seconds() {
        assert_eq!(countdown_label(4.2), "Restarting in 5 s");
        assert_eq!(countdown_label(0.0), "Restarting in 0 s");
        assert_eq!(countdown_label(-0.3), "Restarting in 0 s");
    }
}
