//! SceneryPlugin draws the classroom behind the lesson screens.
use bevy::prelude::*;

use crate::lesson::{assets::load_lesson_assets, LessonSet};

use super::{
    components::CameraShake,
    systems::{
        animate_sheets, apply_scenery_commands, fit_scenery_to_window, shake_camera,
        spawn_scenery,
    },
};

pub struct SceneryPlugin;

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraShake>()
            .add_systems(Startup, spawn_scenery.after(load_lesson_assets))
            .add_systems(
                Update,
                (
                    apply_scenery_commands.in_set(LessonSet::Apply),
                    fit_scenery_to_window,
                    animate_sheets,
                    shake_camera.after(apply_scenery_commands),
                ),
            );

        info!("SceneryPlugin registered");
    }
}
