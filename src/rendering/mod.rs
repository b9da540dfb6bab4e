//! Rendering module - sprites, animation and the 2D camera.

mod animation;
mod depth;
mod plugin;
pub mod visual_config;

pub use animation::{index_images, AnimationCatalog, Animator};
pub use depth::{body_translation, depth_for, MainCamera, FLOOR_DEPTH};
pub use plugin::RenderingPlugin;
pub use visual_config::{rgb, VisualConfig};
