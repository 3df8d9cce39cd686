//! Fixed drill content: the dialogue script and the two quiz options.
use std::fmt;

use super::assets::{ImageKey, SoundCue};

pub const QUIZ_PROMPT: &str = "An earthquake has occurred!\nWhat should you do?";

const DRILL_LINES: [&str; 4] = [
    "Oh no! The ground is shaking...",
    "Stay calm, don’t panic!",
    "Let us learn how we should deal with it!",
    "With mindfulness and knowledge we can tackle it together!",
];

/// A single scripted line and the voice clip that accompanies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    pub text: String,
    pub cue: Option<SoundCue>,
}

impl DialogueLine {
    pub fn new(text: impl Into<String>, cue: Option<SoundCue>) -> Self {
        Self {
            text: text.into(),
            cue,
        }
    }
}

/// Ordered dialogue shown before the quiz. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    lines: Vec<DialogueLine>,
}

impl Script {
    pub fn new(lines: Vec<DialogueLine>) -> Self {
        Self { lines }
    }

    /// Builds a script from plain text; line `i` keeps the `i`-th recorded clip.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| DialogueLine::new(text, SoundCue::for_line(index)))
            .collect();
        Self { lines }
    }

    /// The classroom earthquake script.
    pub fn earthquake_drill() -> Self {
        Self::from_texts(DRILL_LINES)
    }

    pub fn line(&self, index: usize) -> Option<&DialogueLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::earthquake_drill()
    }
}

/// The two answers offered by the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizChoice {
    Hide,
    Leave,
}

impl QuizChoice {
    /// Options in on-screen order.
    pub const ALL: [QuizChoice; 2] = [Self::Hide, Self::Leave];

    /// Maps the 1-based option number shown to the player.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_option_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hide => "Hide under tables and benches",
            Self::Leave => "Try to leave the school premises",
        }
    }

    pub fn consequence_message(self) -> &'static str {
        match self {
            Self::Hide => "Hiding under tables and benches will protect you from rubble if the ceiling falls. This is the safest choice.",
            Self::Leave => "Trying to leave the school premises during an earthquake is extremely dangerous and increases risk of injury or death.",
        }
    }

    pub fn consequence_image(self) -> ImageKey {
        match self {
            Self::Hide => ImageKey::Hiding,
            Self::Leave => ImageKey::Running,
        }
    }

    pub fn consequence_cue(self) -> SoundCue {
        match self {
            Self::Hide => SoundCue::ConsequenceHide,
            Self::Leave => SoundCue::ConsequenceLeave,
        }
    }
}

impl fmt::Display for QuizChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hide => "hide",
            Self::Leave => "leave",
        };
        write!(f, "{}", label)
    }
}
