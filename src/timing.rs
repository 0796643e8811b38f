//! Frame pacing and the physics time scale
//!
//! Physics constants are per-frame values tuned at the reference rate. The
//! measured frame rate turns them into a dt factor so the game plays at the
//! same speed whatever the rate actually is.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::consts::{MIN_MEASURED_FPS, REFERENCE_FPS};

/// Number of frames averaged for the fps estimate
const FPS_WINDOW: usize = 10;

/// Physics dt for a measured frame rate. Rates at or below the floor fall
/// back to the frame limit so a stall cannot blow up the integration.
pub fn physics_dt(measured_fps: f32, fps_limit: u32) -> f32 {
    let fps = if measured_fps > MIN_MEASURED_FPS {
        measured_fps
    } else {
        fps_limit as f32
    };
    REFERENCE_FPS / fps
}

/// Caps the frame rate and measures it
#[derive(Debug)]
pub struct FrameClock {
    fps_limit: u32,
    last: Instant,
    samples: VecDeque<Duration>,
}

impl FrameClock {
    pub fn new(fps_limit: u32) -> Self {
        Self {
            fps_limit,
            last: Instant::now(),
            samples: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    /// Time budget of one frame
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps_limit.max(1) as f64)
    }

    /// Sleep out the rest of the frame budget and record the frame length
    pub fn tick(&mut self) -> Duration {
        let budget = self.frame_budget();
        let elapsed = self.last.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }

        let now = Instant::now();
        let frame = now - self.last;
        self.last = now;
        self.record(frame);
        frame
    }

    fn record(&mut self, frame: Duration) {
        if self.samples.len() == FPS_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(frame);
    }

    /// Averaged frame rate, 0 until the first frame is measured
    pub fn fps(&self) -> f32 {
        let total: Duration = self.samples.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.samples.len() as f32 / total.as_secs_f32()
    }

    /// Physics dt for the current measurement
    pub fn physics_dt(&self) -> f32 {
        physics_dt(self.fps(), self.fps_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_rate_is_unit_dt() {
        assert_eq!(physics_dt(60.0, 120), 1.0);
        assert_eq!(physics_dt(120.0, 120), 0.5);
    }

    #[test]
    fn test_slow_rate_uses_limit() {
        assert_eq!(physics_dt(15.0, 120), 0.5);
        assert_eq!(physics_dt(0.0, 30), 2.0);
    }

    #[test]
    fn test_initial_dt_from_limit() {
        let clock = FrameClock::new(120);
        assert_eq!(clock.fps(), 0.0);
        assert_eq!(clock.physics_dt(), 0.5);
    }

    #[test]
    fn test_fps_averages_window() {
        let mut clock = FrameClock::new(60);
        for _ in 0..FPS_WINDOW * 2 {
            clock.record(Duration::from_millis(20));
        }
        assert_eq!(clock.samples.len(), FPS_WINDOW);
        assert!((clock.fps() - 50.0).abs() < 0.01);
        assert!((clock.physics_dt() - 1.2).abs() < 1e-4);
    }

    #[test]
    fn test_tick_respects_budget() {
        let mut clock = FrameClock::new(120);
        let frame = clock.tick();
        assert!(frame >= clock.frame_budget());
    }

    proptest! {
        #[test]
        fn prop_dt_is_bounded(fps in 0.0f32..1000.0, limit in 30u32..=120) {
            let dt = physics_dt(fps, limit);
            prop_assert!(dt > 0.0);
            prop_assert!(dt <= REFERENCE_FPS / MIN_MEASURED_FPS);
        }
    }
}
