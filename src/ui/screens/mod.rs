// src/ui/screens/mod.rs
//
// Screen module: start button, dialogue box, quiz modal, and consequence modal.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::UiPlugin;
