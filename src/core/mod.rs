//! Core module: drill pacing over Bevy's virtual clock.
pub mod plugin;

pub use plugin::CorePlugin;
