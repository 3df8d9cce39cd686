//! Components tying engine entities back to the lesson flow.
use bevy::prelude::*;

use super::script::QuizChoice;

/// Clickable control; routed to the matching controller handler when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonButton {
    Start,
    Option(QuizChoice),
    GoBack,
}
