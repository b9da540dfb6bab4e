//! Level map structures and RON loading.
//!
//! A level file holds four layers of the same size. Each layer is a list of
//! rows, each row a comma-separated list of integer tokens where `-1` marks
//! an empty cell:
//!
//! - `boundary`: invisible colliders
//! - `objects`: decorative colliders, the token selects the object image
//! - `food`: healing pickups
//! - `entities`: exactly one player spawn marker

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{abort_loading, read_ron_file, DataLoadError, GameConfig, GameState, LoadingSet};

/// Token marking an empty cell in every layer.
pub const EMPTY_CELL: i32 = -1;

/// Token marking the player spawn in the entity layer.
pub const PLAYER_SPAWN_MARKER: i32 = 394;

/// Raw level definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinitionRaw {
    pub name: String,
    /// Animation catalog key of the floor image
    #[serde(default)]
    pub floor: Option<String>,
    pub boundary: Vec<String>,
    pub objects: Vec<String>,
    pub food: Vec<String>,
    pub entities: Vec<String>,
}

/// One parsed layer, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<i32>,
}

impl TileGrid {
    /// Parse rows of comma-separated tokens. Blank rows are skipped.
    pub fn parse(layer: &'static str, rows: &[String]) -> Result<Self, DataLoadError> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for row in rows.iter().filter(|row| !row.trim().is_empty()) {
            let mut row_width = 0;
            for (column, token) in row.split(',').enumerate() {
                let token = token.trim();
                let value = token.parse::<i32>().map_err(|_| DataLoadError::InvalidToken {
                    layer,
                    token: token.to_string(),
                    column,
                    row: height,
                })?;
                cells.push(value);
                row_width += 1;
            }

            match width {
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(DataLoadError::GridMismatch {
                        layer,
                        expected_width: expected,
                        expected_height: height + 1,
                        actual_width: row_width,
                        actual_height: height + 1,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            cells,
        })
    }

    pub fn get(&self, column: usize, row: usize) -> Option<i32> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + column).copied()
    }

    /// Every non-empty cell as `(column, row, token)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, token)| **token != EMPTY_CELL)
            .map(|(index, token)| (index % self.width, index / self.width, *token))
    }
}

/// Validated level with all layers sharing one size.
#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub name: String,
    pub floor: Option<String>,
    pub width: usize,
    pub height: usize,
    pub boundary: TileGrid,
    pub objects: TileGrid,
    pub food: TileGrid,
    /// Grid cell of the player marker (column, row)
    pub player_spawn: (usize, usize),
}

impl LevelDefinition {
    /// Parse every layer and check the player marker.
    pub fn from_raw(raw: LevelDefinitionRaw) -> Result<Self, DataLoadError> {
        let boundary = TileGrid::parse("boundary", &raw.boundary)?;
        let objects = TileGrid::parse("objects", &raw.objects)?;
        let food = TileGrid::parse("food", &raw.food)?;
        let entities = TileGrid::parse("entities", &raw.entities)?;

        for (layer, grid) in [("objects", &objects), ("food", &food), ("entities", &entities)] {
            if grid.width != boundary.width || grid.height != boundary.height {
                return Err(DataLoadError::GridMismatch {
                    layer,
                    expected_width: boundary.width,
                    expected_height: boundary.height,
                    actual_width: grid.width,
                    actual_height: grid.height,
                });
            }
        }

        let mut player_spawn = None;
        for (column, row, token) in entities.occupied() {
            if token != PLAYER_SPAWN_MARKER {
                continue;
            }
            if player_spawn.is_some() {
                return Err(DataLoadError::DuplicatePlayerSpawn { column, row });
            }
            player_spawn = Some((column, row));
        }
        let player_spawn = player_spawn.ok_or(DataLoadError::MissingPlayerSpawn {
            marker: PLAYER_SPAWN_MARKER,
        })?;

        Ok(Self {
            name: raw.name,
            floor: raw.floor,
            width: boundary.width,
            height: boundary.height,
            boundary,
            objects,
            food,
            player_spawn,
        })
    }

    /// Top-left corner of a grid cell in map pixels.
    pub fn grid_to_map(column: usize, row: usize, tile_size: f32) -> Vec2 {
        Vec2::new(column as f32 * tile_size, row as f32 * tile_size)
    }

    /// Size of the whole map in pixels.
    pub fn pixel_size(&self, tile_size: f32) -> Vec2 {
        Vec2::new(self.width as f32 * tile_size, self.height as f32 * tile_size)
    }

    /// Read and validate `assets/data/levels/<name>.level.ron`.
    pub fn load(name: &str) -> Result<Self, DataLoadError> {
        let path = format!("assets/data/levels/{name}.level.ron");
        let raw = read_ron_file::<LevelDefinitionRaw>(Path::new(&path))?;
        Self::from_raw(raw)
    }
}

/// The level being played.
#[derive(Resource, Debug, Clone)]
pub struct CurrentLevel {
    pub definition: LevelDefinition,
}

/// Register the level loader on entering the loading state.
pub fn setup_level_loading(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::Loading),
        load_current_level.in_set(LoadingSet::Tables),
    );
}

/// Load the configured level. A broken map ends the process.
fn load_current_level(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut exit: EventWriter<AppExit>,
) {
    match LevelDefinition::load(&config.level) {
        Ok(definition) => {
            info!(
                "Loaded level '{}' ({}x{} tiles)",
                definition.name, definition.width, definition.height
            );
            commands.insert_resource(CurrentLevel { definition });
        }
        Err(e) => abort_loading(&e, &mut exit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    fn raw_level(entities: &[&str]) -> LevelDefinitionRaw {
        LevelDefinitionRaw {
            name: "test".to_string(),
            floor: None,
            boundary: rows(&["0,0,0", "0,-1,0", "0,0,0"]),
            objects: rows(&["-1,-1,-1", "-1,-1,-1", "-1,-1,2"]),
            food: rows(&["-1,-1,-1", "-1,-1,-1", "-1,-1,-1"]),
            entities: rows(entities),
        }
    }

    #[test]
    fn parses_tokens_and_skips_blank_rows() {
        let grid = TileGrid::parse("boundary", &rows(&["1, -1, 3", "", "-1,5,-1"])).unwrap();
        assert_eq!((grid.width, grid.height), (3, 2));
        assert_eq!(grid.get(2, 0), Some(3));
        assert_eq!(grid.get(1, 1), Some(5));
        assert_eq!(grid.get(3, 0), None);
        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(occupied, vec![(0, 0, 1), (2, 0, 3), (1, 1, 5)]);
    }

    #[test]
    fn rejects_non_integer_token() {
        let err = TileGrid::parse("food", &rows(&["-1,x"])).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidToken { layer: "food", column: 1, row: 0, .. }
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = TileGrid::parse("boundary", &rows(&["1,2,3", "1,2"])).unwrap_err();
        assert!(matches!(err, DataLoadError::GridMismatch { .. }));
    }

    #[test]
    fn finds_single_player_marker() {
        let level = LevelDefinition::from_raw(raw_level(&["-1,-1,-1", "-1,394,-1", "-1,-1,-1"]))
            .unwrap();
        assert_eq!(level.player_spawn, (1, 1));
        assert_eq!((level.width, level.height), (3, 3));
    }

    #[test]
    fn missing_or_duplicate_marker_is_an_error() {
        let missing = LevelDefinition::from_raw(raw_level(&["-1,-1,-1", "-1,-1,-1", "-1,-1,-1"]));
        assert!(matches!(missing, Err(DataLoadError::MissingPlayerSpawn { marker: 394 })));

        let duplicate =
            LevelDefinition::from_raw(raw_level(&["394,-1,-1", "-1,-1,-1", "-1,-1,394"]));
        assert!(matches!(
            duplicate,
            Err(DataLoadError::DuplicatePlayerSpawn { column: 2, row: 2 })
        ));
    }

    #[test]
    fn layers_must_share_dimensions() {
        let result = LevelDefinition::from_raw(raw_level(&["-1,394", "-1,-1", "-1,-1"]));
        assert!(matches!(
            result,
            Err(DataLoadError::GridMismatch { layer: "entities", .. })
        ));
    }
}
