//! Audio plugin - sound cues and background music.
//!
//! Gameplay code never touches the audio backend: it sends `SoundCue`
//! events and this plugin plays them. Music runs on its own channel so it
//! can be stopped without cutting the end screen cues.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioApp, AudioChannel, AudioControl, AudioPlugin, AudioSource};

use crate::core::{GameState, SoundCue};

const SOUNDS_DIR: &str = "sounds";
const MUSIC_FILE: &str = "background_music.wav";
const MUSIC_VOLUME: f64 = 0.1;

/// Channel carrying the looping background track.
#[derive(Resource)]
pub struct MusicChannel;

/// File and volume of every cue.
pub fn cue_source(cue: SoundCue) -> (&'static str, f64) {
    match cue {
        SoundCue::WeaponSwing => ("tornadoSound.mp3", 0.4),
        SoundCue::EnemyHit => ("hit.wav", 0.05),
        SoundCue::EnemyDeath => ("death.wav", 0.05),
        SoundCue::PlayerHit => ("player_hit.wav", 0.3),
        SoundCue::Pickup => ("haps.mp3", 0.4),
        SoundCue::Victory => ("victory.mp3", 0.4),
        SoundCue::Defeat => ("gameOver.wav", 0.4),
    }
}

const ALL_CUES: [SoundCue; 7] = [
    SoundCue::WeaponSwing,
    SoundCue::EnemyHit,
    SoundCue::EnemyDeath,
    SoundCue::PlayerHit,
    SoundCue::Pickup,
    SoundCue::Victory,
    SoundCue::Defeat,
];

/// Loaded sound handles. Missing files are simply absent.
#[derive(Resource, Debug, Default)]
pub struct SoundLibrary {
    cues: HashMap<SoundCue, (Handle<AudioSource>, f64)>,
    music: Option<Handle<AudioSource>>,
}

impl SoundLibrary {
    pub fn cue(&self, cue: SoundCue) -> Option<&(Handle<AudioSource>, f64)> {
        self.cues.get(&cue)
    }
}

/// Audio plugin - loads sounds and plays cues.
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_audio_channel::<MusicChannel>()
            .add_systems(Startup, load_sounds)
            .add_systems(OnEnter(GameState::InGame), start_music)
            .add_systems(OnExit(GameState::InGame), stop_music)
            .add_systems(PostUpdate, play_cues);
    }
}

/// Load `assets/sounds/<file>` if it exists.
fn load_if_present(asset_server: &AssetServer, file: &str) -> Option<Handle<AudioSource>> {
    let relative = format!("{SOUNDS_DIR}/{file}");
    if !Path::new("assets").join(&relative).is_file() {
        warn!("Sound file assets/{} not found, it will be silent", relative);
        return None;
    }
    Some(asset_server.load(relative))
}

fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    let mut library = SoundLibrary {
        music: load_if_present(&asset_server, MUSIC_FILE),
        ..default()
    };
    for cue in ALL_CUES {
        let (file, volume) = cue_source(cue);
        if let Some(handle) = load_if_present(&asset_server, file) {
            library.cues.insert(cue, (handle, volume));
        }
    }
    info!("Loaded {} sound cues", library.cues.len());
    commands.insert_resource(library);
}

fn start_music(library: Res<SoundLibrary>, music: Res<AudioChannel<MusicChannel>>) {
    if let Some(track) = &library.music {
        music.play(track.clone()).looped().with_volume(MUSIC_VOLUME);
    }
}

fn stop_music(music: Res<AudioChannel<MusicChannel>>) {
    music.stop();
}

fn play_cues(mut cues: EventReader<SoundCue>, library: Res<SoundLibrary>, audio: Res<Audio>) {
    for cue in cues.read() {
        if let Some((handle, volume)) = library.cue(*cue) {
            audio.play(handle.clone()).with_volume(*volume);
        }
    }
}
