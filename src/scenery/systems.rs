//! Systems for the classroom backdrop, speaker, fans, and camera shake.
//!
//! The backdrop and fans are world sprites behind the UI. The speaker is a
//! UI node with a global z-index so it stays in front of every screen,
//! including the full-window consequence image.
use bevy::{ecs::message::MessageReader, prelude::*, window::PrimaryWindow};

use crate::lesson::{
    assets::{LessonAssets, SheetHandles, SheetKey},
    events::LessonCommand,
    types::{Backdrop, TalkerPose},
};

use super::components::{
    talker_placement, BackdropSprite, CameraShake, CeilingFan, SheetAnimation, TalkerSprite,
};

const FAN_ANCHORS: [f32; 2] = [430.0, 980.0];
const FAN_TOP_OFFSET: f32 = 60.0;
const FAN_SCALE: f32 = 0.8;
const FAN_TILT_DEGREES: f32 = 25.0;

const BACKDROP_Z: f32 = 0.0;
const FAN_Z: f32 = 1.0;
const TALKER_Z_INDEX: i32 = 10;

/// Spawns the camera, classroom backdrop, hidden speaker, and ceiling fans.
pub fn spawn_scenery(mut commands: Commands, assets: Res<LessonAssets>) {
    commands.spawn((Camera2d, Name::new("Scene Camera")));

    let mut backdrop = Sprite::default();
    if let Some(image) = assets.image(Backdrop::Classroom.image()) {
        backdrop.image = image;
    }
    commands.spawn((
        backdrop,
        Transform::from_xyz(0.0, 0.0, BACKDROP_Z),
        BackdropSprite,
        Name::new("Backdrop"),
    ));

    if let Some(sheet) = assets.sheet(SheetKey::Talker) {
        commands.spawn(talker_bundle(sheet));
    }

    if let Some(sheet) = assets.sheet(SheetKey::Fan) {
        let (frames, fps) = SheetKey::Fan.animation();
        for anchor_x in FAN_ANCHORS {
            let animation = SheetAnimation::new(frames, fps);
            commands.spawn((
                Sprite::from_atlas_image(
                    sheet.image.clone(),
                    TextureAtlas {
                        layout: sheet.layout.clone(),
                        index: animation.first_frame(),
                    },
                ),
                Transform::from_xyz(0.0, 0.0, FAN_Z)
                    .with_scale(Vec3::splat(FAN_SCALE))
                    .with_rotation(Quat::from_rotation_z(-FAN_TILT_DEGREES.to_radians())),
                animation,
                CeilingFan { anchor_x },
                Name::new("Ceiling Fan"),
            ));
        }
    }

    info!("Classroom scenery spawned");
}

/// Hidden speaker node, layered in front of every lesson screen.
fn talker_bundle(sheet: &SheetHandles) -> impl Bundle {
    let (frames, fps) = SheetKey::Talker.animation();
    let animation = SheetAnimation::new(frames, fps);
    (
        talker_placement(TalkerPose::Narrating).node(talker_frame_size()),
        ImageNode::from_atlas_image(
            sheet.image.clone(),
            TextureAtlas {
                layout: sheet.layout.clone(),
                index: animation.first_frame(),
            },
        ),
        GlobalZIndex(TALKER_Z_INDEX),
        Visibility::Hidden,
        animation,
        TalkerSprite,
        Name::new("Talker"),
    )
}

/// Applies backdrop, speaker, and shake commands from the lesson flow.
pub fn apply_scenery_commands(
    mut lesson_commands: MessageReader<LessonCommand>,
    assets: Option<Res<LessonAssets>>,
    mut shake: ResMut<CameraShake>,
    mut backdrops: Query<&mut Sprite, With<BackdropSprite>>,
    mut talkers: Query<(&mut Visibility, &mut Node), With<TalkerSprite>>,
) {
    for command in lesson_commands.read() {
        match command {
            LessonCommand::SetBackdrop(backdrop) => {
                let Some(image) = assets
                    .as_deref()
                    .and_then(|assets| assets.image(backdrop.image()))
                else {
                    continue;
                };
                for mut sprite in backdrops.iter_mut() {
                    sprite.image = image.clone();
                }
            }
            LessonCommand::SetTalker(pose) => {
                for (mut visibility, mut node) in talkers.iter_mut() {
                    match pose {
                        Some(pose) => {
                            *node = talker_placement(*pose).node(talker_frame_size());
                            *visibility = Visibility::Visible;
                        }
                        None => *visibility = Visibility::Hidden,
                    }
                }
            }
            LessonCommand::ShakeCamera {
                duration,
                intensity,
            } => {
                shake.start(*duration, *intensity);
                debug!("Camera shake for {:?} at {:.4}", duration, intensity);
            }
            _ => {}
        }
    }
}

/// Stretches the backdrop to the window and pins the fans to the ceiling.
pub fn fit_scenery_to_window(
    window: Single<&Window, With<PrimaryWindow>>,
    mut backdrops: Query<&mut Sprite, With<BackdropSprite>>,
    mut fans: Query<(&CeilingFan, &mut Transform)>,
) {
    let size = window.size();
    for mut sprite in backdrops.iter_mut() {
        if sprite.custom_size != Some(size) {
            sprite.custom_size = Some(size);
        }
    }

    for (fan, mut transform) in fans.iter_mut() {
        transform.translation.x = fan.anchor_x - size.x / 2.0;
        transform.translation.y = size.y / 2.0 - FAN_TOP_OFFSET;
    }
}

/// Steps every looping sprite-sheet animation, in the world and in the UI.
pub fn animate_sheets(
    time: Res<Time>,
    mut sprites: Query<(&mut SheetAnimation, &mut Sprite)>,
    mut images: Query<(&mut SheetAnimation, &mut ImageNode), Without<Sprite>>,
) {
    for (mut animation, mut sprite) in sprites.iter_mut() {
        if let Some(index) = animation.tick(time.delta()) {
            if let Some(atlas) = sprite.texture_atlas.as_mut() {
                atlas.index = index;
            }
        }
    }

    for (mut animation, mut image) in images.iter_mut() {
        if let Some(index) = animation.tick(time.delta()) {
            if let Some(atlas) = image.texture_atlas.as_mut() {
                atlas.index = index;
            }
        }
    }
}

fn talker_frame_size() -> f32 {
    SheetKey::Talker.frame_size().x as f32
}

/// Jitters the camera while a shake is running and recentres it afterwards.
pub fn shake_camera(
    time: Res<Time>,
    mut shake: ResMut<CameraShake>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut camera: Single<&mut Transform, With<Camera2d>>,
) {
    if !shake.is_active() && camera.translation.truncate() == Vec2::ZERO {
        return;
    }

    let offset = shake
        .sample(time.delta(), time.elapsed(), window.size())
        .unwrap_or(Vec2::ZERO);
    camera.translation.x = offset.x;
    camera.translation.y = offset.y;
}
