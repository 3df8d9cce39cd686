use std::path::Path;

use bevy::prelude::*;

mod audio;
mod core;
mod lesson;
mod scenery;
mod ui;

use crate::{
    audio::LessonAudioPlugin,
    core::CorePlugin,
    lesson::{
        config::{LessonSettings, CONFIG_PATH},
        LessonPlugin,
    },
    scenery::SceneryPlugin,
    ui::UiPlugin,
};

const WINDOW_TITLE: &str = "Earthquake Safety Drill";

fn main() {
    let settings = load_lesson_settings();

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: WINDOW_TITLE.to_string(),
                    ..default()
                }),
                ..default()
            }),
            CorePlugin::with_time_scale(settings.time_scale),
            LessonPlugin::new(settings),
            SceneryPlugin,
            UiPlugin,
            LessonAudioPlugin, // After LessonPlugin so LessonSet is configured
        ))
        .run();
}

fn load_lesson_settings() -> LessonSettings {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        return LessonSettings::default();
    }

    LessonSettings::load_from(path).unwrap_or_else(|err| {
        eprintln!("{}. Falling back to defaults.", err);
        LessonSettings::default()
    })
}
