//! Systems turning lesson sound commands into audio players.
use bevy::{ecs::message::MessageReader, prelude::*};

use crate::lesson::{
    assets::{LessonAssets, SoundCue},
    events::LessonCommand,
};

/// Tags an audio player with the cue it is playing.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonSound(pub SoundCue);

/// Starts and stops sounds. Players spawned earlier in the same batch are
/// tracked locally so a later stop in that batch still reaches them.
pub fn apply_audio_commands(
    mut commands: Commands,
    assets: Option<Res<LessonAssets>>,
    mut lesson_commands: MessageReader<LessonCommand>,
    playing: Query<(Entity, &LessonSound)>,
) {
    let mut spawned: Vec<(Entity, SoundCue)> = Vec::new();
    let mut stopped: Vec<Entity> = Vec::new();

    for command in lesson_commands.read() {
        match command {
            LessonCommand::PlaySound(cue) => {
                let Some(handle) = assets.as_deref().and_then(|assets| assets.sound(*cue)) else {
                    debug!("No clip loaded for {}, skipping", cue);
                    continue;
                };
                let entity = commands
                    .spawn((
                        AudioPlayer::new(handle),
                        PlaybackSettings::DESPAWN,
                        LessonSound(*cue),
                        Name::new(format!("Sound {}", cue)),
                    ))
                    .id();
                spawned.push((entity, *cue));
            }
            LessonCommand::StopSound(cue) => {
                let existing = playing
                    .iter()
                    .filter(|(_, sound)| sound.0 == *cue)
                    .map(|(entity, _)| entity);
                let fresh = spawned
                    .iter()
                    .filter(|(_, spawned_cue)| spawned_cue == cue)
                    .map(|(entity, _)| *entity);
                stopped.extend(existing.chain(fresh));
                spawned.retain(|(_, spawned_cue)| spawned_cue != cue);
            }
            LessonCommand::StopAllSounds => {
                stopped.extend(playing.iter().map(|(entity, _)| entity));
                stopped.extend(spawned.drain(..).map(|(entity, _)| entity));
            }
            _ => {}
        }
    }

    stopped.sort();
    stopped.dedup();
    for entity in stopped {
        commands.entity(entity).despawn();
    }
}
