//! Flippyflap - A flap-through-the-columns arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, physics, scoring)
//! - `renderer`: Terminal presentation (sprites, collision masks)
//! - `platform`: Terminal session and input events
//! - `audio`: Procedural sound effects and music
//! - `settings`: Startup configuration with lock
//! - `driver`: The per-frame loop tying everything together

pub mod audio;
pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod timing;

pub use error::{Error, Result};
pub use settings::Config;

/// Game configuration constants
///
/// All lengths are in normalized screen units: `(0, 0)` is the top-left
/// corner and `(1, 1)` the bottom-right. Per-frame rates are calibrated at
/// [`REFERENCE_FPS`](consts::REFERENCE_FPS).
pub mod consts {
    /// Frame rate the per-frame physics constants are tuned for
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Below this measured rate the frame limit is used to compute dt
    pub const MIN_MEASURED_FPS: f32 = 15.0;
    /// Accepted frame-rate caps
    pub const FPS_LIMIT_MIN: u32 = 30;
    pub const FPS_LIMIT_MAX: u32 = 120;

    /// Column width
    pub const COLUMN_WIDTH: f32 = 0.08;
    /// Horizontal space between neighbouring columns
    pub const COLUMN_GAP: f32 = 0.2;
    /// Column scroll per frame (negative = leftwards)
    pub const COLUMN_DX: f32 = -0.0047;
    /// Smallest pool that covers the screen width with columns
    pub const N_COLUMNS: usize = {
        let fit = 1.0 / (COLUMN_WIDTH + COLUMN_GAP);
        let whole = fit as usize;
        if (whole as f32) < fit { whole + 1 } else { whole }
    };

    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.0007;
    /// Vertical velocity set by a flap (negative = upwards)
    pub const FLAP: f32 = -0.012;
    /// Knockback multiplier applied to `FLAP` on collision
    pub const COLLISION_BOUNCE: f32 = 1.5;
    pub const PLAYER_START_X: f32 = 0.15;
    pub const PLAYER_START_Y: f32 = 0.5;

    /// Idle bob: `IDLE_Y + IDLE_AMPLITUDE * sin(IDLE_RATE * t)`
    pub const IDLE_Y: f32 = 0.3;
    pub const IDLE_AMPLITUDE: f32 = 0.05;
    pub const IDLE_RATE: f32 = 3.0;
}

#[cfg(test)]
mod tests {
    use super::consts::*;

    #[test]
    fn test_pool_covers_screen() {
        assert_eq!(N_COLUMNS, 4);
        assert!(N_COLUMNS as f32 * (COLUMN_WIDTH + COLUMN_GAP) >= 1.0);
        assert!(((N_COLUMNS - 1) as f32) * (COLUMN_WIDTH + COLUMN_GAP) < 1.0);
    }
}
