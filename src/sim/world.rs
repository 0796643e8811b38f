//! Per-frame world update
//!
//! Owns the player and the fixed column pool and advances them in a fixed
//! order each frame: player, high score, columns, scoring/recycling, reset.

use super::entity::{Column, Player};
use super::state::{GamePhase, StateMachine, is_main_game};
use crate::consts::*;

/// The player and a fixed-size pool of recycled columns
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub(crate) player: Player,
    pub(crate) columns: [Column; N_COLUMNS],
    high_score: u32,
    /// Simulation time in seconds, accumulated from dt
    time: f32,
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameWorld {
    pub fn new(high_score: u32) -> Self {
        let mut world = Self {
            player: Player::new(),
            columns: std::array::from_fn(|i| Column::new(Column::start_x(i))),
            high_score,
            time: 0.0,
        };
        world.reset();
        world
    }

    /// Put every column back at its staggered spawn offset and the player at
    /// its start position
    pub fn reset(&mut self) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            *column = Column::new(Column::start_x(i));
        }
        self.player.set_pos(Player::START);
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn columns(&self) -> &[Column; N_COLUMNS] {
        &self.columns
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the world by one frame.
    ///
    /// A column whose swept strip contains the player's x scores a point and
    /// pulses `Score`. `Score` is itself a main-game phase, so later columns
    /// in the same frame are still checked.
    pub fn update(&mut self, machine: &mut StateMachine, dt: f32) {
        self.time += dt / REFERENCE_FPS;

        self.player.update(machine, dt, self.time);
        self.high_score = self.high_score.max(self.player.score);

        for column in &mut self.columns {
            column.update(machine, dt);
        }

        if is_main_game(machine.state()) {
            for column in &mut self.columns {
                if column.is_off_screen() {
                    column.recycle();
                } else if column.swept(self.player.x(), dt) {
                    machine.set(GamePhase::Score);
                    self.player.score += 1;
                    log::debug!("Scored, now {}", self.player.score);
                }
            }
        } else if machine.state() == GamePhase::Reset {
            self.reset();
        }
    }

    /// React to a collision flagged by the presentation this frame
    pub fn postupdate(&mut self, machine: &StateMachine, _dt: f32) {
        if machine.state() == GamePhase::Collision {
            self.player.dy = COLLISION_BOUNCE * FLAP;
        }
    }
}
