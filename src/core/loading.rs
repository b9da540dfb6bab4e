//! Shared helpers for reading RON data tables from disk.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::de::DeserializeOwned;

use super::error::DataLoadError;

/// Read and parse a single RON file.
pub fn read_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Read every `*.ron` file in `dir`, keyed by file stem.
///
/// An empty directory is an error: tables loaded this way are mandatory.
pub fn read_ron_dir<T: DeserializeOwned>(dir: &Path) -> Result<HashMap<String, T>, DataLoadError> {
    if !dir.is_dir() {
        return Err(DataLoadError::FileNotFound(dir.display().to_string()));
    }

    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut definitions = HashMap::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let definition = read_ron_file(&path)?;
        definitions.insert(stem.to_string(), definition);
    }

    if definitions.is_empty() {
        return Err(DataLoadError::EmptyRegistry(dir.display().to_string()));
    }
    Ok(definitions)
}

/// Log a fatal loading error and ask the app to exit with a failure code.
pub fn abort_loading(error: &DataLoadError, exit: &mut EventWriter<AppExit>) {
    error!("{}", error);
    exit.send(AppExit::error());
}
