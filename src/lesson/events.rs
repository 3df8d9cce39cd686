//! Commands the flow controller issues to the presentation systems.
use std::time::Duration;

use bevy::prelude::Message;

use super::{
    assets::SoundCue,
    types::{Backdrop, ScreenKind, ScreenView, TalkerPose},
};

/// One effect requested by the controller, applied later in the same frame.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum LessonCommand {
    ShowScreen(ScreenView),
    ClearScreen(ScreenKind),
    SetBackdrop(Backdrop),
    SetTalker(Option<TalkerPose>),
    ShakeCamera { duration: Duration, intensity: f32 },
    PlaySound(SoundCue),
    StopSound(SoundCue),
    StopAllSounds,
}
