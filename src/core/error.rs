//! Error types for data loading.

use thiserror::Error;

/// Errors that can occur when loading settings, balance tables or maps.
///
/// The game does not run on corrupt static content: every variant ends the
/// process from the loading state.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File or directory could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Grid dimensions don't match between layers.
    #[error("Grid mismatch in layer '{layer}': expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    GridMismatch {
        layer: &'static str,
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// A map cell is not an integer token.
    #[error("Invalid token '{token}' in layer '{layer}' at column {column}, row {row}")]
    InvalidToken {
        layer: &'static str,
        token: String,
        column: usize,
        row: usize,
    },

    /// The entity layer has no player marker.
    #[error("No player spawn marker ({marker}) in the entity layer")]
    MissingPlayerSpawn { marker: i32 },

    /// The entity layer has more than one player marker.
    #[error("Second player spawn marker at column {column}, row {row}")]
    DuplicatePlayerSpawn { column: usize, row: usize },

    /// A mandatory table directory held no definitions.
    #[error("No definitions found in '{0}'")]
    EmptyRegistry(String),

    /// The configured starting weapon is not in the weapon table.
    #[error("Unknown weapon '{0}'")]
    UnknownWeapon(String),
}
