//! Core game module - states, events, settings and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod cooldown;
mod error;
mod events;
mod loading;
mod plugin;
mod states;

#[cfg(test)]
pub mod test_utils;

pub use config::*;
pub use cooldown::Cooldown;
pub use error::DataLoadError;
pub use events::*;
pub use loading::{abort_loading, read_ron_dir, read_ron_file};
pub use plugin::{CorePlugin, GameplaySet, LoadingSet};
pub use states::*;
