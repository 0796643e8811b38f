//! The frame loop
//!
//! One tick: per-frame transitions, input, world update, presentation
//! update (which may flag a collision), world postupdate, draw.

use crate::error::Result;
use crate::platform::{InputEvent, InputSource, dispatch};
use crate::renderer::Presentation;
use crate::settings::Config;
use crate::sim::{GameFacade, GamePhase, StateMachine};
use crate::timing::FrameClock;

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns everything a running game needs
pub struct Driver<P: Presentation> {
    machine: StateMachine,
    facade: GameFacade,
    presentation: P,
    config: Config,
}

impl<P: Presentation> Driver<P> {
    pub fn new(config: Config, facade: GameFacade, presentation: P) -> Self {
        Self {
            machine: StateMachine::new(),
            facade,
            presentation,
            config,
        }
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn facade(&self) -> &GameFacade {
        &self.facade
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one tick with the events gathered since the last one
    pub fn frame(&mut self, events: impl IntoIterator<Item = InputEvent>, dt: f32) -> Result<Flow> {
        self.machine.transition_on_tick();

        for event in events {
            dispatch(&mut self.machine, &mut self.config, event);
        }
        if self.machine.state() == GamePhase::Quit {
            return Ok(Flow::Quit);
        }

        if self.machine.state() != GamePhase::Pause {
            self.facade.update(&mut self.machine, dt);
            self.presentation
                .update(&mut self.machine, &self.facade, &self.config, dt);
            self.facade.postupdate(&self.machine, dt);
            self.presentation.draw()?;
        }
        Ok(Flow::Continue)
    }

    /// Loop until the player quits
    pub fn run(&mut self, input: &mut impl InputSource) -> Result<()> {
        let mut clock = FrameClock::new(self.config.fps_limit());
        let mut dt = clock.physics_dt();
        log::info!("Game loop started at {} fps cap", self.config.fps_limit());

        loop {
            let events = input.poll()?;
            if self.frame(events, dt)? == Flow::Quit {
                break;
            }
            clock.tick();
            dt = clock.physics_dt();
        }

        log::info!(
            "Game loop finished (high score {})",
            self.facade.high_score()
        );
        Ok(())
    }

    /// Give back the facade, e.g. to read the final high score
    pub fn into_facade(self) -> GameFacade {
        self.facade
    }
}
