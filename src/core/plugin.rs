//! CorePlugin paces the drill by scaling Bevy's virtual clock.
//!
//! Lesson timers, the camera shake, and sprite animation all read `Time`
//! during `Update`, which follows `Time<Virtual>`. Changing [`DrillPace`]
//! re-paces all of them at once.
use bevy::prelude::*;

pub const DEFAULT_TIME_SCALE: f32 = 1.0;
pub const MIN_TIME_SCALE: f32 = 0.001;
pub const MAX_TIME_SCALE: f32 = 16.0;

/// Drill time relative to wall time; 2.0 runs the narration twice as fast.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DrillPace {
    time_scale: f32,
}

impl DrillPace {
    pub fn new(time_scale: f32) -> Self {
        Self {
            time_scale: clamp_scale(time_scale),
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = clamp_scale(time_scale);
    }

    /// Doubles the pace, for skipping through narration while testing a build.
    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn faster(&mut self) {
        self.set_time_scale(self.time_scale * 2.0);
    }

    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn slower(&mut self) {
        self.set_time_scale(self.time_scale / 2.0);
    }
}

impl Default for DrillPace {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

fn clamp_scale(time_scale: f32) -> f32 {
    if time_scale.is_finite() {
        time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
    } else {
        DEFAULT_TIME_SCALE
    }
}

/// Installs the drill pace and keeps virtual time in step with it.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
}

impl CorePlugin {
    pub const fn with_time_scale(time_scale: f32) -> Self {
        Self { time_scale }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::with_time_scale(DEFAULT_TIME_SCALE)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DrillPace::new(self.time_scale))
            .add_systems(
                PreUpdate,
                apply_drill_pace.run_if(resource_changed::<DrillPace>),
            );

        // ] doubles and [ halves the pace
        #[cfg(feature = "core_debug")]
        {
            app.add_systems(PreUpdate, adjust_pace_from_keys.before(apply_drill_pace));
        }
    }
}

fn apply_drill_pace(pace: Res<DrillPace>, mut time: ResMut<Time<Virtual>>) {
    time.set_relative_speed(pace.time_scale());
    info!("Drill time scale set to {:.3}", pace.time_scale());
}

#[cfg(feature = "core_debug")]
fn adjust_pace_from_keys(keys: Res<ButtonInput<KeyCode>>, mut pace: ResMut<DrillPace>) {
    if keys.just_pressed(KeyCode::BracketRight) {
        pace.faster();
    } else if keys.just_pressed(KeyCode::BracketLeft) {
        pace.slower();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pace_app(time_scale: f32) -> App {
        let mut app = App::new();
        app.init_resource::<Time<Virtual>>()
            .insert_resource(DrillPace::new(time_scale))
            .add_systems(
                Update,
                apply_drill_pace.run_if(resource_changed::<DrillPace>),
            );
        app
    }

    #[test]
    fn pace_drives_virtual_time_speed() {
        let mut app = pace_app(2.0);
        app.update();
        assert_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), 2.0);

        app.world_mut()
            .resource_mut::<DrillPace>()
            .set_time_scale(0.5);
        app.update();
        assert_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), 0.5);
    }

    #[test]
    fn out_of_range_scale_is_clamped() {
        assert_eq!(DrillPace::new(0.0).time_scale(), MIN_TIME_SCALE);
        assert_eq!(DrillPace::new(-3.0).time_scale(), MIN_TIME_SCALE);
        assert_eq!(DrillPace::new(f32::NAN).time_scale(), DEFAULT_TIME_SCALE);
        assert_eq!(DrillPace::new(100.0).time_scale(), MAX_TIME_SCALE);
    }

    #[test]
    fn debug_keys_step_pace_in_powers_of_two() {
        let mut pace = DrillPace::default();
        pace.faster();
        pace.faster();
        assert_eq!(pace.time_scale(), 4.0);
        pace.slower();
        assert_eq!(pace.time_scale(), 2.0);

        for _ in 0..10 {
            pace.faster();
        }
        assert_eq!(pace.time_scale(), MAX_TIME_SCALE);
    }
}
