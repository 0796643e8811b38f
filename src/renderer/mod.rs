//! Terminal presentation
//!
//! Draws the world from the read-only [`GameFacade`], detects pixel-exact
//! collisions (which the simulation cannot do without sprite geometry) and
//! plays sounds. Game coordinates become pixels only here.

pub mod assets;
pub mod pixels;
pub mod sprites;
pub mod terminal;

pub use assets::Assets;
pub use pixels::{Bitmap, CollisionMask, PixelBuf, Rgb};
pub use terminal::TerminalPresentation;

use crate::error::Result;
use crate::settings::Config;
use crate::sim::{GameFacade, Position, StateMachine};

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: usize,
    pub height: usize,
}

impl Surface {
    /// Smallest surface the level art fits on
    pub const MIN: Surface = Surface {
        width: 32,
        height: 20,
    };

    /// Requested size clipped to what the display offers; the whole display
    /// when fullscreen
    pub fn fit(config: &Config, available: (u32, u32)) -> Result<Self> {
        let (width, height) = if config.fullscreen() {
            available
        } else {
            let size = config.screen_size();
            (size.width.min(available.0), size.height.min(available.1))
        };
        let surface = Surface {
            width: width as usize,
            height: height as usize,
        };
        if surface.width < Self::MIN.width || surface.height < Self::MIN.height {
            return Err(crate::Error::resource(
                "display",
                format!(
                    "{}x{} pixels is smaller than the {}x{} minimum",
                    surface.width, surface.height, Self::MIN.width, Self::MIN.height
                ),
            ));
        }
        Ok(surface)
    }

    /// Translate a normalized game position to pixel coordinates
    pub fn game_to_ui(&self, pos: Position) -> (i32, i32) {
        (
            (pos.x * self.width as f32).round() as i32,
            (pos.y * self.height as f32).round() as i32,
        )
    }
}

/// Anything drawn on the surface
pub trait Sprite {
    /// Top-left corner in pixels
    fn position(&self) -> (i32, i32);
    fn update(&mut self, machine: &StateMachine, facade: &GameFacade, dt: f32);
    fn draw(&self, buf: &mut PixelBuf);
}

/// The presentation side of a frame. `update` may set `Collision`; the
/// world reacts to it in its postupdate.
pub trait Presentation {
    fn update(&mut self, machine: &mut StateMachine, facade: &GameFacade, config: &Config, dt: f32);
    fn draw(&mut self) -> Result<()>;
}
