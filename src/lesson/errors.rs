//! Error types surfaced while loading lesson configuration.
use std::{fmt, path::PathBuf};

/// Failure reading or parsing `config/lesson.toml`.
#[derive(Debug, Clone)]
pub enum LessonConfigError {
    Read { path: PathBuf, message: String },
    Parse { message: String },
}

impl LessonConfigError {
    pub fn read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

impl fmt::Display for LessonConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "failed to read {}: {}", path.display(), message)
            }
            Self::Parse { message } => write!(f, "invalid lesson config: {}", message),
        }
    }
}

impl std::error::Error for LessonConfigError {}
