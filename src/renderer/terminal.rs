//! The terminal presentation: sprites, collision check and audio

use std::io::Write;

use super::assets::{Assets, SKY_TOP};
use super::pixels::PixelBuf;
use super::sprites::{Background, Level, PlayerSprite, ScoreBoard};
use super::{Presentation, Sprite, Surface};
use crate::audio::AudioPlayer;
use crate::error::Result;
use crate::settings::Config;
use crate::sim::{GameFacade, GamePhase, StateMachine};

/// Draws the game into a half-block pixel buffer and writes it to `out`
pub struct TerminalPresentation<W: Write> {
    out: W,
    buf: PixelBuf,
    background: Background,
    level: Level,
    player: PlayerSprite,
    scoreboard: ScoreBoard,
    audio: AudioPlayer,
}

impl<W: Write> TerminalPresentation<W> {
    pub fn new(
        out: W,
        surface: Surface,
        facade: &GameFacade,
        assets: Assets,
        audio: AudioPlayer,
        seed: u64,
    ) -> Self {
        log::info!(
            "Presentation surface {}x{} (seed {})",
            surface.width,
            surface.height,
            seed
        );
        Self {
            out,
            buf: PixelBuf::new(surface.width, surface.height, SKY_TOP),
            background: Background::new(surface, assets.cloud, seed),
            level: Level::new(surface, facade, seed.wrapping_add(1)),
            player: PlayerSprite::new(surface, assets.player, assets.player_hit),
            scoreboard: ScoreBoard::new(surface, assets.digits, assets.gold_digits),
            audio,
        }
    }

    /// Draw order is back to front
    fn sprites(&self) -> [&dyn Sprite; 4] {
        [&self.background, &self.level, &self.player, &self.scoreboard]
    }

    fn player_collides(&self) -> bool {
        self.level
            .mask()
            .overlaps(self.player.image(), self.player.position())
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Presentation for TerminalPresentation<W> {
    fn update(&mut self, machine: &mut StateMachine, facade: &GameFacade, config: &Config, dt: f32) {
        self.background.update(machine, facade, dt);
        self.level.update(machine, facade, dt);
        self.player.update(machine, facade, dt);
        self.scoreboard.update(machine, facade, dt);

        if machine.state() != GamePhase::WaitReset && self.player_collides() {
            if machine.state() != GamePhase::Collision {
                log::debug!("Collision at {:?}", facade.player_position());
            }
            machine.set(GamePhase::Collision);
            // Switch to the hit image within the same frame
            self.player.update(machine, facade, dt);
        }

        self.audio.update(machine, config.mute());
    }

    fn draw(&mut self) -> Result<()> {
        let mut buf = std::mem::replace(&mut self.buf, PixelBuf::new(0, 0, SKY_TOP));
        for sprite in self.sprites() {
            sprite.draw(&mut buf);
        }
        buf.render(&mut self.out)?;
        self.buf = buf;
        Ok(())
    }
}
