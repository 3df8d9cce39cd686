//! Systems feeding clicks and timer expirations into the flow controller.
use std::time::Duration;

use bevy::{ecs::message::MessageWriter, prelude::*};

use super::{
    assets::SoundCue,
    components::LessonButton,
    controller::DialogueFlowController,
    events::LessonCommand,
    host::LessonHost,
    timers::FlowTimers,
    types::{Backdrop, ScreenKind, ScreenView, TalkerPose, TimerId, TimerStep, Transition},
};

/// `LessonHost` backed by the Bevy world: timers go straight into
/// [`FlowTimers`], everything else is buffered as [`LessonCommand`]s.
pub struct EngineHost<'a> {
    timers: &'a mut FlowTimers,
    issued: Vec<LessonCommand>,
}

impl<'a> EngineHost<'a> {
    pub fn new(timers: &'a mut FlowTimers) -> Self {
        Self {
            timers,
            issued: Vec::new(),
        }
    }

    pub fn into_commands(self) -> Vec<LessonCommand> {
        self.issued
    }
}

impl LessonHost for EngineHost<'_> {
    fn show_screen(&mut self, view: ScreenView) {
        self.issued.push(LessonCommand::ShowScreen(view));
    }

    fn clear_screen(&mut self, kind: ScreenKind) {
        self.issued.push(LessonCommand::ClearScreen(kind));
    }

    fn set_backdrop(&mut self, backdrop: Backdrop) {
        self.issued.push(LessonCommand::SetBackdrop(backdrop));
    }

    fn set_talker(&mut self, pose: Option<TalkerPose>) {
        self.issued.push(LessonCommand::SetTalker(pose));
    }

    fn shake_camera(&mut self, duration: Duration, intensity: f32) {
        self.issued.push(LessonCommand::ShakeCamera {
            duration,
            intensity,
        });
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.issued.push(LessonCommand::PlaySound(cue));
    }

    fn stop_sound(&mut self, cue: SoundCue) {
        self.issued.push(LessonCommand::StopSound(cue));
    }

    fn stop_all_sounds(&mut self) {
        self.issued.push(LessonCommand::StopAllSounds);
    }

    fn schedule(&mut self, delay: Duration, step: TimerStep) -> TimerId {
        let id = self.timers.schedule(delay, step);
        debug!(target: "lesson", "Scheduled {:?} as {} in {:?}", step, id, delay);
        id
    }

    fn cancel_timer(&mut self, id: TimerId) {
        if self.timers.cancel(id) {
            debug!(target: "lesson", "Cancelled {}", id);
        }
    }
}

/// Shows the start screen once the scene is up.
pub fn present_start_screen(
    mut controller: ResMut<DialogueFlowController>,
    mut timers: ResMut<FlowTimers>,
    mut commands: MessageWriter<LessonCommand>,
) {
    let mut host = EngineHost::new(&mut timers);
    let transition = controller.reset_to_start(&mut host);
    log_transition("startup", transition);
    commands.write_batch(host.into_commands());
}

/// Routes pressed lesson buttons to the controller.
pub fn handle_lesson_buttons(
    mut controller: ResMut<DialogueFlowController>,
    mut timers: ResMut<FlowTimers>,
    mut commands: MessageWriter<LessonCommand>,
    buttons: Query<(&Interaction, &LessonButton), Changed<Interaction>>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }

        let mut host = EngineHost::new(&mut timers);
        let transition = match *button {
            LessonButton::Start => controller.on_start(&mut host),
            LessonButton::Option(choice) => controller.on_option_click(choice, &mut host),
            LessonButton::GoBack => controller.on_go_back(&mut host),
        };
        log_transition(&format!("{:?} pressed", button), transition);
        commands.write_batch(host.into_commands());
    }
}

/// Ticks the timer table with paced drill time and delivers expirations.
pub fn advance_flow_timers(
    time: Res<Time>,
    mut controller: ResMut<DialogueFlowController>,
    mut timers: ResMut<FlowTimers>,
    mut commands: MessageWriter<LessonCommand>,
) {
    let expired = timers.tick(time.delta());
    if expired.is_empty() {
        return;
    }

    let mut host = EngineHost::new(&mut timers);
    for id in expired {
        let transition = controller.on_timer_fire(id, &mut host);
        log_transition(&format!("{} fired", id), transition);
    }
    commands.write_batch(host.into_commands());
}

fn log_transition(trigger: &str, transition: Transition) {
    match transition {
        Transition::Moved { from, to } => {
            info!(target: "lesson", "{}: {} -> {}", trigger, from, to);
        }
        Transition::Ignored { state, reason } => {
            debug!(target: "lesson", "{} ignored in {} ({})", trigger, state, reason);
        }
    }
}
