//! Lesson plugin wiring the flow controller, its timers, and the command stream.
use bevy::prelude::*;

use super::{
    assets::load_lesson_assets,
    config::LessonSettings,
    controller::DialogueFlowController,
    events::LessonCommand,
    systems::{advance_flow_timers, handle_lesson_buttons, present_start_screen},
    timers::FlowTimers,
};

/// Frame phases: the controller reacts first, presentation applies its commands after.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonSet {
    Drive,
    Apply,
}

pub struct LessonPlugin {
    settings: LessonSettings,
}

impl LessonPlugin {
    pub fn new(settings: LessonSettings) -> Self {
        Self { settings }
    }
}

impl Default for LessonPlugin {
    fn default() -> Self {
        Self::new(LessonSettings::default())
    }
}

impl Plugin for LessonPlugin {
    fn build(&self, app: &mut App) {
        info!(
            "LessonPlugin registered: {} dialogue lines, {:?} between lines, {:?} before quiz",
            self.settings.script.len(),
            self.settings.timings.line_interval,
            self.settings.timings.quiz_delay
        );

        if self.settings.script.is_empty() {
            warn!("Dialogue script is empty; Start Module opens the quiz directly");
        }

        app.insert_resource(DialogueFlowController::new(
            self.settings.script.clone(),
            self.settings.timings,
        ))
        .init_resource::<FlowTimers>()
        .add_message::<LessonCommand>()
        .configure_sets(Update, (LessonSet::Drive, LessonSet::Apply).chain())
        .add_systems(Startup, (load_lesson_assets, present_start_screen).chain())
        .add_systems(
            Update,
            (handle_lesson_buttons, advance_flow_timers)
                .chain()
                .in_set(LessonSet::Drive),
        );
    }
}
