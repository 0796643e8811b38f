//! Platform abstraction layer
//!
//! Handles the outside world:
//! - Input events and their mapping onto game phases
//! - Terminal session setup/teardown and event polling

pub mod input;
pub mod terminal;

pub use input::{InputEvent, Key, MouseButton, dispatch};
pub use terminal::{TerminalInput, TerminalSession};

use crate::error::Result;

/// A source of input events, drained once per tick without blocking
pub trait InputSource {
    fn poll(&mut self) -> Result<Vec<InputEvent>>;
}
