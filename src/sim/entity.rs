//! Physics objects: the scrolling columns and the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, StateMachine, is_main_game};
use crate::consts::*;

/// Normalized screen position, origin top-left, +y down
pub type Position = Vec2;

/// A column obstacle. The opening the player flies through is a
/// presentation detail; the simulation only tracks the column's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub pos: Position,
}

impl Column {
    pub const WIDTH: f32 = COLUMN_WIDTH;
    pub const DX: f32 = COLUMN_DX;

    pub fn new(start_x: f32) -> Self {
        Self {
            pos: Vec2::new(start_x, 0.0),
        }
    }

    /// Spawn offset of the `index`-th column in the pool
    pub fn start_x(index: usize) -> f32 {
        1.0 + index as f32 * (COLUMN_WIDTH + COLUMN_GAP)
    }

    /// Scroll left while the game is running
    pub fn update(&mut self, machine: &StateMachine, dt: f32) {
        if is_main_game(machine.state()) {
            self.pos.x += dt * Self::DX;
        }
    }

    /// Trailing edge has left the screen
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + Self::WIDTH < 0.0
    }

    /// Teleport back to the right edge
    pub fn recycle(&mut self) {
        self.pos.x = 1.0;
    }

    /// Whether `x` lies in the strip this column swept over during a frame
    /// of length `dt`
    pub fn swept(&self, x: f32, dt: f32) -> bool {
        let min = self.pos.x;
        let max = min + (dt * Self::DX).abs();
        (min..=max).contains(&x)
    }
}

/// The player. Vertical position is kept inside the screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pos: Position,
    pub dy: f32,
    pub score: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub const START: Vec2 = Vec2::new(PLAYER_START_X, PLAYER_START_Y);

    pub fn new() -> Self {
        Self {
            pos: Self::START,
            dy: 0.0,
            score: 0,
        }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Move to `pos`, clamping y to the screen
    pub fn set_pos(&mut self, pos: Position) {
        self.pos.x = pos.x;
        self.set_y(pos.y);
    }

    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y.clamp(0.0, 1.0);
    }

    /// Idle bob height at simulation time `t` (seconds)
    pub fn idle_y(t: f32) -> f32 {
        IDLE_Y + IDLE_AMPLITUDE * (IDLE_RATE * t).sin()
    }

    /// Advance one frame.
    ///
    /// `time` is the accumulated simulation time and only drives the idle bob.
    /// Falling below the screen while waiting for reset moves the machine to
    /// `Reset`, which clears the score in the same frame.
    pub fn update(&mut self, machine: &mut StateMachine, dt: f32, time: f32) {
        let state = machine.state();

        if state == GamePhase::WaitFirstFlap {
            self.set_y(Self::idle_y(time));
        } else if is_main_game(state) || state == GamePhase::WaitReset {
            if state == GamePhase::Flap {
                self.dy = FLAP;
            } else if state == GamePhase::WaitReset && self.pos.y >= 1.0 {
                log::debug!("Player left the screen, resetting");
                machine.set(GamePhase::Reset);
            }

            self.dy += dt * GRAVITY;
            self.set_y(self.pos.y + dt * self.dy);
        }

        if machine.state() == GamePhase::Reset {
            self.score = 0;
            self.set_y(Self::idle_y(time));
        }
    }
}
