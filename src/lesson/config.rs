use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::core::plugin::{DEFAULT_TIME_SCALE, MIN_TIME_SCALE};

use super::{errors::LessonConfigError, script::Script};

pub const CONFIG_PATH: &str = "config/lesson.toml";
const MAX_SHAKE_INTENSITY: f32 = 0.1;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawLessonConfig {
    #[serde(default)]
    clock: RawClock,
    #[serde(default)]
    timing: RawTiming,
    #[serde(default)]
    shake: RawShake,
    #[serde(default)]
    script: RawScript,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawClock {
    time_scale: f32,
}

impl Default for RawClock {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTiming {
    line_interval_ms: u64,
    quiz_delay_ms: u64,
    options_prompt_delay_ms: u64,
}

impl Default for RawTiming {
    fn default() -> Self {
        Self {
            line_interval_ms: 3000,
            quiz_delay_ms: 5000,
            options_prompt_delay_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawShake {
    duration_ms: u64,
    intensity: f32,
}

impl Default for RawShake {
    fn default() -> Self {
        Self {
            duration_ms: 13_000,
            intensity: 0.003,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawScript {
    lines: Option<Vec<String>>,
}

/// Delays and effect strengths used by the flow controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowTimings {
    pub line_interval: Duration,
    pub quiz_delay: Duration,
    pub options_prompt_delay: Duration,
    pub shake_duration: Duration,
    /// Fraction of the window size the camera may drift while shaking.
    pub shake_intensity: f32,
}

impl Default for FlowTimings {
    fn default() -> Self {
        RawLessonConfig::default().timings()
    }
}

/// Runtime configuration derived from `config/lesson.toml`.
#[derive(Debug, Clone)]
pub struct LessonSettings {
    pub time_scale: f32,
    pub timings: FlowTimings,
    pub script: Script,
}

impl Default for LessonSettings {
    fn default() -> Self {
        RawLessonConfig::default().into()
    }
}

impl LessonSettings {
    pub fn load_from(path: &Path) -> Result<Self, LessonConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| LessonConfigError::read(path, err.to_string()))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, LessonConfigError> {
        let parsed = toml::from_str::<RawLessonConfig>(raw)
            .map_err(|err| LessonConfigError::parse(err.to_string()))?;
        Ok(parsed.into())
    }
}

impl RawLessonConfig {
    fn timings(&self) -> FlowTimings {
        FlowTimings {
            line_interval: Duration::from_millis(self.timing.line_interval_ms),
            quiz_delay: Duration::from_millis(self.timing.quiz_delay_ms),
            options_prompt_delay: Duration::from_millis(self.timing.options_prompt_delay_ms),
            shake_duration: Duration::from_millis(self.shake.duration_ms),
            shake_intensity: self.shake.intensity.clamp(0.0, MAX_SHAKE_INTENSITY),
        }
    }
}

impl From<RawLessonConfig> for LessonSettings {
    fn from(value: RawLessonConfig) -> Self {
        let timings = value.timings();

        let script = match value.script.lines {
            Some(lines) => Script::from_texts(
                lines
                    .iter()
                    .map(|line| line.trim())
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            ),
            None => Script::earthquake_drill(),
        };

        Self {
            time_scale: value.clock.time_scale.max(MIN_TIME_SCALE),
            timings,
            script,
        }
    }
}
