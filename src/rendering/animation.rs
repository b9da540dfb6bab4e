//! Frame-sequence animation backed by a catalog of images on disk.
//!
//! The catalog scans `assets/graphics/` once at startup. Every directory
//! holding images becomes a sequence named by its relative path
//! (`player/right_idle`, `enemies/tomato/move`) and every image is also
//! addressable on its own (`weapons/tornado/right`). Frames are ordered by
//! file name, comparing a trailing frame number numerically.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;

const GRAPHICS_ROOT: &str = "assets/graphics";
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Image sequences and single images addressed by path-like keys.
#[derive(Resource, Debug, Default)]
pub struct AnimationCatalog {
    sequences: HashMap<String, Vec<Handle<Image>>>,
    images: HashMap<String, Handle<Image>>,
}

impl AnimationCatalog {
    /// Frames of a sequence, empty when the folder does not exist.
    pub fn frames(&self, key: &str) -> &[Handle<Image>] {
        self.sequences.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_sequence(&self, key: &str) -> bool {
        !self.frames(key).is_empty()
    }

    /// A single image by its path without extension.
    pub fn image(&self, key: &str) -> Option<Handle<Image>> {
        self.images.get(key).cloned()
    }

    pub fn insert_sequence(&mut self, key: impl Into<String>, frames: Vec<Handle<Image>>) {
        self.sequences.insert(key.into(), frames);
    }

    pub fn insert_image(&mut self, key: impl Into<String>, image: Handle<Image>) {
        self.images.insert(key.into(), image);
    }

    /// Sprite showing `image`, or a flat placeholder rectangle when absent.
    pub fn sprite_or_placeholder(image: Option<Handle<Image>>, size: Vec2, placeholder: Color) -> Sprite {
        match image {
            Some(image) => Sprite {
                image,
                custom_size: Some(size),
                ..default()
            },
            None => Sprite::from_color(placeholder, size),
        }
    }

    /// Sprite showing the first frame of a sequence, or a placeholder.
    pub fn sequence_sprite(&self, key: &str, size: Vec2, placeholder: Color) -> Sprite {
        Self::sprite_or_placeholder(self.frames(key).first().cloned(), size, placeholder)
    }
}

/// Cycles through the frames of a catalog sequence.
#[derive(Component, Debug, Clone)]
pub struct Animator {
    /// Catalog key of the sequence being played
    pub sequence: String,
    /// Fractional frame cursor
    pub frame_index: f32,
    /// Frames advanced per tick
    pub speed: f32,
}

impl Animator {
    pub fn new(sequence: impl Into<String>, speed: f32) -> Self {
        Self {
            sequence: sequence.into(),
            frame_index: 0.0,
            speed,
        }
    }

    /// Advance the cursor and return the frame to show.
    ///
    /// The cursor wraps to zero once it passes the sequence length. Returns
    /// `None` for an empty sequence.
    pub fn advance(&mut self, frame_count: usize) -> Option<usize> {
        if frame_count == 0 {
            return None;
        }
        self.frame_index += self.speed;
        if self.frame_index >= frame_count as f32 {
            self.frame_index = 0.0;
        }
        Some(self.frame_index as usize)
    }
}

/// Sort key of a frame: file stem without its trailing number, then the number.
///
/// `right_2.png` sorts before `right_10.png`.
fn frame_order(path: &str) -> (String, Option<u64>, String) {
    let stem = path.rsplit_once('.').map_or(path, |(stem, _)| stem);
    let prefix = stem.trim_end_matches(|c: char| c.is_ascii_digit());
    let number = stem[prefix.len()..].parse().ok();
    (prefix.to_string(), number, path.to_string())
}

/// Group relative image paths into sequences and single images.
///
/// Returns `(sequences, images)`: sequence keys are parent directories and
/// their frames are in frame order; image keys drop the file extension.
pub fn index_images(paths: &[String]) -> (BTreeMap<String, Vec<String>>, BTreeMap<String, String>) {
    let mut sequences: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut images = BTreeMap::new();

    for path in paths {
        let Some((stem, _extension)) = path.rsplit_once('.') else {
            continue;
        };
        images.insert(stem.to_string(), path.clone());

        let folder = path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        sequences.entry(folder.to_string()).or_default().push(path.clone());
    }

    for frames in sequences.values_mut() {
        frames.sort_by_cached_key(|path| frame_order(path));
    }
    (sequences, images)
}

/// Recursively collect image files below `dir`.
fn collect_image_files(dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_image_files(&path, found);
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        {
            found.push(path);
        }
    }
}

/// Scan the graphics folder and queue every image for loading.
pub fn build_animation_catalog(mut commands: Commands, asset_server: Res<AssetServer>) {
    let root = Path::new(GRAPHICS_ROOT);
    let mut catalog = AnimationCatalog::default();

    if !root.is_dir() {
        warn!("Graphics folder {:?} not found, every sprite uses a placeholder", root);
        commands.insert_resource(catalog);
        return;
    }

    let mut files = Vec::new();
    collect_image_files(root, &mut files);
    let relative: Vec<String> = files
        .iter()
        .filter_map(|path| path.strip_prefix(root).ok())
        .map(|path| path.to_string_lossy().replace('\\', "/"))
        .collect();

    let (sequences, images) = index_images(&relative);
    for (key, path) in &images {
        catalog.insert_image(key.clone(), asset_server.load(format!("graphics/{path}")));
    }
    for (key, frames) in sequences {
        let handles = frames
            .iter()
            .map(|path| asset_server.load(format!("graphics/{path}")))
            .collect();
        catalog.insert_sequence(key, handles);
    }

    info!(
        "Indexed {} images in {} animation folders",
        catalog.images.len(),
        catalog.sequences.len()
    );
    commands.insert_resource(catalog);
}

/// Sequence keys already reported as missing.
#[derive(Debug, Default)]
pub struct MissingSequences(HashSet<String>);

impl MissingSequences {
    /// True the first time `key` is seen.
    pub fn first_report(&mut self, key: &str) -> bool {
        if self.0.contains(key) {
            return false;
        }
        self.0.insert(key.to_string())
    }
}

/// Advance every animator and show its current frame.
///
/// Sprites whose sequence is missing keep their placeholder, with one
/// warning per missing sequence.
pub fn advance_animations(
    catalog: Res<AnimationCatalog>,
    mut missing: Local<MissingSequences>,
    mut query: Query<(&mut Animator, &mut Sprite)>,
) {
    for (mut animator, mut sprite) in query.iter_mut() {
        let frames = catalog.frames(&animator.sequence);
        if frames.is_empty() && missing.first_report(&animator.sequence) {
            warn!(
                "Animation folder graphics/{} not found, using a placeholder",
                animator.sequence
            );
        }
        if let Some(index) = animator.advance(frames.len()) {
            if let Some(frame) = frames.get(index) {
                sprite.image = frame.clone();
                sprite.color = Color::WHITE;
            }
        }
    }
}
