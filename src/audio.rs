//! Background music and the game-over cue.
//!
//! Music loops while a session runs and stops the moment Earth is hit; the cue
//! is a one-shot that despawns itself when done.  Both are session scoped so a
//! restart never leaves a stray sound behind.

use crate::config::GameConfig;
use crate::session::{SessionPhase, SessionScoped};
use bevy::audio::Volume;
use bevy::prelude::*;

pub const BACKGROUND_MUSIC_PATH: &str = "audios/background-music.ogg";
pub const GAME_OVER_CUE_PATH: &str = "audios/game-over.ogg";

/// Marker for the looping soundtrack entity.
#[derive(Component)]
pub struct BackgroundMusic;

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(SessionPhase::Running), start_music_system)
            .add_systems(
                OnEnter(SessionPhase::GameOver),
                (stop_music_system, play_game_over_cue_system),
            );
    }
}

pub fn start_music_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    q_music: Query<(), With<BackgroundMusic>>,
) {
    if !q_music.is_empty() {
        return;
    }
    commands.spawn((
        BackgroundMusic,
        SessionScoped,
        AudioPlayer::new(asset_server.load(BACKGROUND_MUSIC_PATH)),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(config.music_volume)),
    ));
}

pub fn stop_music_system(mut commands: Commands, q_music: Query<Entity, With<BackgroundMusic>>) {
    for entity in q_music.iter() {
        commands.entity(entity).despawn();
    }
}

pub fn play_game_over_cue_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    commands.spawn((
        SessionScoped,
        AudioPlayer::new(asset_server.load(GAME_OVER_CUE_PATH)),
        PlaybackSettings::DESPAWN.with_volume(Volume::Linear(config.game_over_cue_volume)),
    ));
}
