// src/ui/screens/plugin.rs
//
// UiPlugin applies screen commands issued by the lesson flow.

use bevy::prelude::*;

use crate::lesson::LessonSet;

use super::components::{ScreenLayout, ScreenTracker};
use super::systems::{apply_screen_commands, highlight_hovered_buttons};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.init_resource::<ScreenLayout>()
            .init_resource::<ScreenTracker>()
            .add_systems(
                Update,
                (
                    apply_screen_commands.in_set(LessonSet::Apply),
                    highlight_hovered_buttons,
                ),
            );
    }
}
