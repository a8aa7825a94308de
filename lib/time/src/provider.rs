//! The deterministic game clock.

use crate::config::TimeProviderConfig;

/// What a frame's wall-clock tick produced: how many fixed steps are now
/// pending, and the raw (unpaused) delta observed since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAdvance {
    /// Number of fixed steps the accumulator can satisfy, uncapped. A caller
    /// bounding work per frame (the scheduler) decides how many of these to
    /// actually consume via [`TimeProvider::consume_step`].
    pub pending_steps: u32,
    /// `(wall_ms - previous_wall_ms) / 1000 * time_scale`, or `0.0` while paused.
    pub delta_time: f64,
}

/// A monotonic, pausable, time-scaled game clock driven by a fixed-timestep
/// accumulator.
///
/// `TimeProvider` never advances `game_time` on its own: [`Self::begin_frame`]
/// only measures how much simulation time has accumulated since the last
/// frame. Advancing the clock happens one step at a time via
/// [`Self::consume_step`], so a caller that wants to cap work per frame can
/// stop consuming early — the undrained remainder simply stays in the
/// accumulator for the next frame, rather than vanishing.
#[derive(Debug, Clone)]
pub struct TimeProvider {
    config: TimeProviderConfig,
    game_time: f64,
    last_wall_ms: Option<f64>,
    accumulator: f64,
    interpolation: f64,
    last_delta: f64,
    paused: bool,
    time_scale: f64,
}

impl TimeProvider {
    pub fn new(config: TimeProviderConfig) -> Self {
        Self {
            config,
            game_time: 0.0,
            last_wall_ms: None,
            accumulator: 0.0,
            interpolation: 0.0,
            last_delta: 0.0,
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Measures elapsed wall-clock time since the previous call and folds it
    /// into the accumulator. The very first call only establishes the wall
    /// baseline and reports no pending steps.
    pub fn begin_frame(&mut self, wall_ms: f64) -> FrameAdvance {
        let Some(last_wall_ms) = self.last_wall_ms else {
            self.last_wall_ms = Some(wall_ms);
            return FrameAdvance { pending_steps: 0, delta_time: 0.0 };
        };

        if self.paused {
            self.last_wall_ms = Some(wall_ms);
            self.last_delta = 0.0;
            self.interpolation = 0.0;
            return FrameAdvance { pending_steps: 0, delta_time: 0.0 };
        }

        let raw_delta = (wall_ms - last_wall_ms) / 1000.0 * self.time_scale;
        self.last_wall_ms = Some(wall_ms);
        self.last_delta = raw_delta;
        self.accumulator += raw_delta;

        let fixed_dt = self.config.fixed_dt();
        let pending_steps = (self.accumulator / fixed_dt).floor().max(0.0) as u32;
        FrameAdvance { pending_steps, delta_time: raw_delta }
    }

    /// Consumes one fixed step from the accumulator, advancing `game_time`
    /// by `fixed_dt`. Returns `false` (and does nothing) once less than a
    /// full step remains.
    pub fn consume_step(&mut self) -> bool {
        let fixed_dt = self.config.fixed_dt();
        if self.accumulator + 1e-12 < fixed_dt {
            return false;
        }
        self.game_time += fixed_dt;
        self.accumulator -= fixed_dt;
        self.interpolation = self.accumulator / fixed_dt;
        true
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes the clock. `wall_ms` re-baselines the wall clock so the next
    /// [`Self::begin_frame`] does not observe the elapsed pause duration as
    /// simulation time.
    pub fn resume(&mut self, wall_ms: f64) {
        self.paused = false;
        self.last_wall_ms = Some(wall_ms);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        if scale < 0.0 {
            log::warn!("rejected negative time scale {scale}, clamping to 0");
            self.time_scale = 0.0;
        } else {
            self.time_scale = scale;
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    /// Last observed delta time, `0.0` while paused.
    pub fn delta_time(&self) -> f64 {
        self.last_delta
    }

    /// Residual accumulator fraction in `[0, 1)`, for smooth rendering
    /// between fixed updates.
    pub fn interpolation(&self) -> f64 {
        self.interpolation
    }

    pub fn config(&self) -> &TimeProviderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TimeProvider {
        TimeProvider::new(TimeProviderConfig { target_fps: 60 })
    }

    #[test]
    fn first_frame_establishes_baseline_with_no_steps() {
        let mut tp = provider();
        let adv = tp.begin_frame(0.0);
        assert_eq!(adv.pending_steps, 0);
        assert_eq!(tp.game_time(), 0.0);
    }

    #[test]
    fn scenario_a_fixed_timestep_catch_up() {
        let mut tp = provider();
        tp.begin_frame(0.0);
        let adv = tp.begin_frame(100.0);
        assert_eq!(adv.pending_steps, 6);

        let max_updates_per_frame = 5;
        let mut consumed = 0;
        for _ in 0..max_updates_per_frame {
            if tp.consume_step() {
                consumed += 1;
            }
        }
        assert_eq!(consumed, 5);
        assert!((tp.game_time() - 5.0 / 60.0).abs() < 1e-9);
        // One whole step's worth of simulation time remains uncommitted.
        assert!(tp.interpolation() > 0.9);
    }

    #[test]
    fn delta_time_zero_while_paused() {
        let mut tp = provider();
        tp.begin_frame(0.0);
        tp.pause();
        let adv = tp.begin_frame(500.0);
        assert_eq!(adv.delta_time, 0.0);
        assert_eq!(tp.delta_time(), 0.0);
        assert_eq!(adv.pending_steps, 0);
    }

    #[test]
    fn pause_resume_with_zero_elapsed_leaves_game_time_unchanged() {
        let mut tp = provider();
        tp.begin_frame(0.0);
        tp.begin_frame(16.0);
        tp.consume_step();
        let before = tp.game_time();

        tp.pause();
        tp.resume(16.0);
        assert_eq!(tp.game_time(), before);
    }

    #[test]
    fn scenario_f_pause_resume_does_not_report_elapsed_pause_as_delta() {
        let mut tp = provider();
        tp.begin_frame(0.0);
        tp.pause();
        tp.resume(10_016.0);
        let adv = tp.begin_frame(10_032.0);
        assert!(adv.delta_time < 0.1);
        assert_eq!(adv.pending_steps, 1);
    }

    #[test]
    fn negative_time_scale_clamps_to_zero() {
        let mut tp = provider();
        tp.set_time_scale(-1.0);
        assert_eq!(tp.time_scale(), 0.0);
    }

    #[test]
    fn restoring_time_scale_restores_advancement_rate() {
        let mut tp = provider();
        tp.begin_frame(0.0);
        tp.set_time_scale(2.0);
        let fast = tp.begin_frame(100.0).pending_steps;

        tp.reset();
        tp.begin_frame(0.0);
        tp.set_time_scale(1.0);
        let normal = tp.begin_frame(200.0).pending_steps;
        assert_eq!(fast, normal);
    }

    #[test]
    fn game_time_never_decreases_across_many_frames() {
        let mut tp = provider();
        let mut wall = 0.0;
        let mut previous = tp.game_time();
        tp.begin_frame(wall);
        for _ in 0..200 {
            wall += 7.3;
            let adv = tp.begin_frame(wall);
            for _ in 0..adv.pending_steps.min(5) {
                tp.consume_step();
            }
            assert!(tp.game_time() >= previous);
            previous = tp.game_time();
        }
    }
}
