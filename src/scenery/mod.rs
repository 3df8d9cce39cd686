//! Scenery module: backdrop, speaker sprite, ceiling fans, and camera shake.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::SceneryPlugin;
