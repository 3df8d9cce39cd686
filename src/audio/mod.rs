//! Audio module mapping sound cues onto Bevy audio players.
pub mod plugin;
pub mod systems;

pub use plugin::LessonAudioPlugin;
