//! Components and resources for the classroom scenery.
use std::time::Duration;

use bevy::prelude::*;

use crate::lesson::types::TalkerPose;

/// Marker for the full-window background sprite.
#[derive(Component, Debug, Default)]
pub struct BackdropSprite;

/// Marker for the speaking character, a UI node drawn above every screen.
#[derive(Component, Debug, Default)]
pub struct TalkerSprite;

/// Ceiling fan pinned to the top edge, `anchor_x` pixels from the left.
#[derive(Component, Debug)]
pub struct CeilingFan {
    pub anchor_x: f32,
}

/// Loops a fixed list of atlas frames.
#[derive(Component, Debug)]
pub struct SheetAnimation {
    frames: &'static [usize],
    cursor: usize,
    timer: Timer,
}

impl SheetAnimation {
    pub fn new(frames: &'static [usize], fps: f32) -> Self {
        Self {
            frames,
            cursor: 0,
            timer: Timer::from_seconds(1.0 / fps.max(0.1), TimerMode::Repeating),
        }
    }

    pub fn first_frame(&self) -> usize {
        self.frames.first().copied().unwrap_or(0)
    }

    /// Advances the timer; returns the new atlas index when the frame changes.
    pub fn tick(&mut self, delta: Duration) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }
        self.timer.tick(delta);
        let steps = self.timer.times_finished_this_tick() as usize;
        if steps == 0 {
            return None;
        }
        self.cursor = (self.cursor + steps) % self.frames.len();
        Some(self.frames[self.cursor])
    }
}

/// Reference point for the speaker's centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TalkerAnchor {
    /// Pixels from the window's top-left corner.
    TopLeft(Vec2),
    /// Pixels from the window centre, y pointing down.
    Centre(Vec2),
}

/// Where a pose puts the speaker and how large it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TalkerPlacement {
    pub anchor: TalkerAnchor,
    pub scale: f32,
}

impl TalkerPlacement {
    /// UI node placing a `frame`-pixel square sprite centred on the anchor.
    pub fn node(&self, frame: f32) -> Node {
        let size = frame * self.scale;
        let half = size / 2.0;
        let mut node = Node {
            position_type: PositionType::Absolute,
            width: Val::Px(size),
            height: Val::Px(size),
            ..default()
        };

        match self.anchor {
            TalkerAnchor::TopLeft(centre) => {
                node.left = Val::Px(centre.x - half);
                node.top = Val::Px(centre.y - half);
            }
            TalkerAnchor::Centre(offset) => {
                node.left = Val::Percent(50.0);
                node.top = Val::Percent(50.0);
                node.margin = UiRect {
                    left: Val::Px(offset.x - half),
                    top: Val::Px(offset.y - half),
                    ..default()
                };
            }
        }
        node
    }
}

pub fn talker_placement(pose: TalkerPose) -> TalkerPlacement {
    match pose {
        TalkerPose::Narrating | TalkerPose::Consequence => TalkerPlacement {
            anchor: TalkerAnchor::TopLeft(Vec2::new(440.0, 280.0)),
            scale: 0.5,
        },
        TalkerPose::Quiz => TalkerPlacement {
            anchor: TalkerAnchor::Centre(Vec2::new(-230.0, -40.0)),
            scale: 0.4,
        },
    }
}

/// Active camera shake, if any.
#[derive(Resource, Debug, Default)]
pub struct CameraShake {
    active: Option<ShakeState>,
}

#[derive(Debug)]
struct ShakeState {
    timer: Timer,
    intensity: f32,
}

impl CameraShake {
    pub fn start(&mut self, duration: Duration, intensity: f32) {
        self.active = Some(ShakeState {
            timer: Timer::new(duration, TimerMode::Once),
            intensity,
        });
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Camera offset for this frame; `None` once the shake has ended.
    pub fn sample(&mut self, delta: Duration, elapsed: Duration, window: Vec2) -> Option<Vec2> {
        let state = self.active.as_mut()?;
        state.timer.tick(delta);
        if state.timer.is_finished() {
            self.active = None;
            return None;
        }

        let t = elapsed.as_secs_f32();
        let jitter = Vec2::new((t * 73.0).sin(), (t * 91.0).cos());
        Some(jitter * window * state.intensity)
    }
}
