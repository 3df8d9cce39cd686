// src/ui/screens/components.rs
//
// Components and resources for the drill's full-window screens.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::lesson::types::ScreenKind;

/// Root node of one screen. Despawning it removes every visual and control.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRoot(pub ScreenKind);

/// Resource tracking the root entity of each screen currently spawned.
///
/// Spawns and clears issued in the same frame resolve against this map,
/// so a screen shown and cleared in one batch never lingers.
#[derive(Resource, Debug, Default)]
pub struct ScreenTracker {
    pub active: HashMap<ScreenKind, Entity>,
}

impl ScreenTracker {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn visible(&self) -> impl Iterator<Item = ScreenKind> + '_ {
        self.active.keys().copied()
    }
}

/// Resource containing sizes and fonts for the drill screens.
#[derive(Resource, Debug)]
pub struct ScreenLayout {
    /// Start button size (pixels).
    pub start_button_size: Vec2,

    /// Dialogue and consequence modal size (pixels).
    pub message_modal_size: Vec2,

    /// Quiz modal size (pixels).
    pub quiz_modal_size: Vec2,

    /// Distance of the message modal from the top edge (pixels).
    pub message_top_offset: f32,

    /// Maximum width of wrapped modal text (pixels).
    pub text_wrap_width: f32,

    pub start_font_size: f32,
    pub dialogue_font_size: f32,
    pub quiz_prompt_font_size: f32,
    pub option_font_size: f32,
    pub consequence_font_size: f32,
    pub go_back_font_size: f32,
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self {
            start_button_size: Vec2::new(200.0, 60.0),
            message_modal_size: Vec2::new(660.0, 260.0),
            quiz_modal_size: Vec2::new(700.0, 530.0),
            message_top_offset: 60.0,
            text_wrap_width: 500.0,
            start_font_size: 22.0,
            dialogue_font_size: 20.0,
            quiz_prompt_font_size: 23.0,
            option_font_size: 20.0,
            consequence_font_size: 18.0,
            go_back_font_size: 24.0,
        }
    }
}
