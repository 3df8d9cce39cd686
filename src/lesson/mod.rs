//! Lesson module: drill content, the dialogue flow controller, and its Bevy wiring.
pub mod assets;
pub mod components;
pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod host;
pub mod plugin;
pub mod script;
pub mod systems;
pub mod timers;
pub mod types;

pub use plugin::{LessonPlugin, LessonSet};
