//! Collaborator contract the flow controller drives.
use std::time::Duration;

use super::{
    assets::SoundCue,
    types::{Backdrop, ScreenKind, ScreenView, TalkerPose, TimerId, TimerStep},
};

/// Rendering, audio, and scheduling surface supplied by the engine.
///
/// The controller never touches the engine directly; every visible or
/// audible effect goes through one of these calls.
pub trait LessonHost {
    /// Creates the visuals and controls for a screen.
    fn show_screen(&mut self, view: ScreenView);

    /// Destroys every visual and control owned by the screen.
    fn clear_screen(&mut self, kind: ScreenKind);

    fn set_backdrop(&mut self, backdrop: Backdrop);

    /// `None` hides the speaker.
    fn set_talker(&mut self, pose: Option<TalkerPose>);

    fn shake_camera(&mut self, duration: Duration, intensity: f32);

    fn play_sound(&mut self, cue: SoundCue);

    fn stop_sound(&mut self, cue: SoundCue);

    fn stop_all_sounds(&mut self);

    /// Schedules `step` to be delivered back through `on_timer_fire` after `delay`.
    fn schedule(&mut self, delay: Duration, step: TimerStep) -> TimerId;

    fn cancel_timer(&mut self, id: TimerId);
}
