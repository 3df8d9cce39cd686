//! Shared state, screen, and timer types exposed by the lesson module.
use std::fmt;

use super::{assets::ImageKey, script::QuizChoice};

/// Which part of the drill is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowState {
    #[default]
    Start,
    PlayingDialogue(usize),
    QuizShown,
    ConsequenceShown(QuizChoice),
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::PlayingDialogue(index) => write!(f, "dialogue[{}]", index),
            Self::QuizShown => write!(f, "quiz"),
            Self::ConsequenceShown(choice) => write!(f, "consequence({})", choice),
        }
    }
}

/// Top-level screens; at most one is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Start,
    Dialogue,
    Quiz,
    Consequence,
}

/// Content needed to build a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Start,
    Dialogue {
        text: String,
    },
    Quiz {
        prompt: String,
        options: Vec<QuizChoice>,
    },
    Consequence {
        choice: QuizChoice,
        message: String,
        image: ImageKey,
    },
}

impl ScreenView {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Self::Start => ScreenKind::Start,
            Self::Dialogue { .. } => ScreenKind::Dialogue,
            Self::Quiz { .. } => ScreenKind::Quiz,
            Self::Consequence { .. } => ScreenKind::Consequence,
        }
    }
}

/// Full-window image behind every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backdrop {
    #[default]
    Classroom,
    AfterEarthquake,
}

impl Backdrop {
    pub fn image(self) -> ImageKey {
        match self {
            Self::Classroom => ImageKey::Classroom,
            Self::AfterEarthquake => ImageKey::AfterEarthquake,
        }
    }
}

/// Where and how large the speaker sprite is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TalkerPose {
    Narrating,
    Quiz,
    Consequence,
}

/// Handle for a scheduled continuation. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// What a pending timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerStep {
    /// Show the next dialogue line.
    DialogueAdvance,
    /// Leave the last line and open the quiz.
    QuizReveal,
    /// Play the spoken list of options.
    OptionsPrompt,
}

/// Outcome of feeding an input into the flow controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: FlowState, to: FlowState },
    Ignored { state: FlowState, reason: IgnoredReason },
}

impl Transition {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }
}

/// Why an input was dropped without touching the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The clicked control does not belong to the visible screen.
    ControlNotShown,
    /// The timer was cancelled or superseded before it fired.
    StaleTimer,
}

impl fmt::Display for IgnoredReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ControlNotShown => "control not on screen",
            Self::StaleTimer => "stale timer",
        };
        write!(f, "{}", label)
    }
}
