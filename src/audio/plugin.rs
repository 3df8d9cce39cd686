//! AudioPlugin plays and stops the drill's voice and effect clips.
use bevy::prelude::*;

use crate::lesson::LessonSet;

use super::systems::apply_audio_commands;

pub struct LessonAudioPlugin;

impl Plugin for LessonAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_audio_commands.in_set(LessonSet::Apply));

        info!("LessonAudioPlugin registered");
    }
}
