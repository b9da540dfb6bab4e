//! Progression module - level number, wave size and the enemy roster.

mod plugin;
mod systems;
mod wave;

pub use plugin::ProgressionPlugin;
pub use systems::{advance_progression, next_step, WaveStep};
pub use wave::WaveState;
