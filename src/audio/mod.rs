//! Audio module - sound cues and background music.

mod plugin;

pub use plugin::{cue_source, MusicChannel, SoundLibrary, SoundPlugin};
