//! Read-only view of the world for the presentation layer

use super::entity::{Column, Position};
use super::state::StateMachine;
use super::world::GameWorld;
use crate::consts::N_COLUMNS;

/// The only surface the presentation sees. Exposes positions and scores,
/// and forwards the two per-frame entry points to the world.
#[derive(Debug, Clone, Default)]
pub struct GameFacade {
    world: GameWorld,
}

impl GameFacade {
    pub fn new(high_score: u32) -> Self {
        Self {
            world: GameWorld::new(high_score),
        }
    }

    pub fn update(&mut self, machine: &mut StateMachine, dt: f32) {
        self.world.update(machine, dt);
    }

    pub fn postupdate(&mut self, machine: &StateMachine, dt: f32) {
        self.world.postupdate(machine, dt);
    }

    /// Column positions in pool order
    pub fn column_positions(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.world.columns().iter().map(|c| c.pos)
    }

    pub fn player_position(&self) -> Position {
        self.world.player().pos()
    }

    pub fn score(&self) -> u32 {
        self.world.player().score
    }

    pub fn high_score(&self) -> u32 {
        self.world.high_score()
    }

    pub fn n_columns(&self) -> usize {
        N_COLUMNS
    }

    /// Column scroll per frame at the reference rate
    pub fn scroll_speed(&self) -> f32 {
        Column::DX
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut GameWorld {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_projection_matches_world() {
        let facade = GameFacade::new(9);
        assert_eq!(facade.n_columns(), 4);
        assert_eq!(facade.column_positions().len(), facade.n_columns());
        assert_eq!(facade.high_score(), 9);
        assert_eq!(facade.score(), 0);
        assert_eq!(facade.scroll_speed(), COLUMN_DX);
        assert_eq!(
            facade.player_position(),
            Position::new(PLAYER_START_X, PLAYER_START_Y)
        );
    }

    #[test]
    fn test_forwards_update() {
        let mut facade = GameFacade::new(0);
        let mut machine = StateMachine::new();
        machine.set(GamePhase::Default);
        let before: Vec<_> = facade.column_positions().collect();
        facade.update(&mut machine, 1.0);
        let after: Vec<_> = facade.column_positions().collect();
        for (b, a) in before.iter().zip(&after) {
            assert!(a.x < b.x);
            assert_eq!(a.y, 0.0);
        }

        machine.set(GamePhase::Collision);
        facade.postupdate(&machine, 1.0);
        facade.update(&mut machine, 1.0);
        assert!(facade.player_position().y < 0.5);
    }
}
