//! Startup configuration
//!
//! Filled in once from the command line, validated, then locked. After the
//! lock only the mute flag may change; every other setter fails.

use serde::{Deserialize, Serialize};

use crate::consts::{FPS_LIMIT_MAX, FPS_LIMIT_MIN};
use crate::error::{Error, Result};

/// Surface size in logical pixels (one terminal cell is 1x2 pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 80,
            height: 48,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Frame-rate cap
    fps_limit: u32,
    /// Use the whole terminal instead of `screen_size`
    fullscreen: bool,
    /// Requested surface size
    screen_size: ScreenSize,
    /// Audio disabled (writable after lock)
    mute: bool,
    #[serde(skip)]
    locked: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps_limit: 60,
            fullscreen: false,
            screen_size: ScreenSize::default(),
            mute: false,
            locked: false,
        }
    }
}

impl Config {
    pub fn fps_limit(&self) -> u32 {
        self.fps_limit
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.screen_size
    }

    pub fn mute(&self) -> bool {
        self.mute
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn ensure_unlocked(&self, field: &'static str) -> Result<()> {
        if self.locked {
            return Err(Error::ConfigLocked { field });
        }
        Ok(())
    }

    pub fn set_fps_limit(&mut self, fps: u32) -> Result<()> {
        self.ensure_unlocked("fps_limit")?;
        self.fps_limit = fps;
        Ok(())
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()> {
        self.ensure_unlocked("fullscreen")?;
        self.fullscreen = fullscreen;
        Ok(())
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.ensure_unlocked("screen_size")?;
        self.screen_size = ScreenSize { width, height };
        Ok(())
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
    }

    /// Flip the mute flag, returning the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.mute = !self.mute;
        self.mute
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(FPS_LIMIT_MIN..=FPS_LIMIT_MAX).contains(&self.fps_limit) {
            return Err(Error::InvalidConfig(format!(
                "fps_limit must be between {} and {}, got {}",
                FPS_LIMIT_MIN, FPS_LIMIT_MAX, self.fps_limit
            )));
        }
        if self.screen_size.width == 0 || self.screen_size.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "screen_size must be non-zero, got {}x{}",
                self.screen_size.width, self.screen_size.height
            )));
        }
        Ok(())
    }

    /// Validate and freeze every field except `mute`
    pub fn lock(&mut self) -> Result<()> {
        self.validate()?;
        self.locked = true;
        log::info!("Configuration locked: {}", serde_json::to_string(self)?);
        Ok(())
    }
}
