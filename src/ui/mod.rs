// src/ui/mod.rs
//
// UI module providing the drill's screen-space screens.
//
// Current features:
// - Start, dialogue, quiz, and consequence screens driven by LessonCommand

pub mod screens;

// Re-export the main plugin
pub use screens::UiPlugin;
