//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time enters only through the per-frame dt
//! - Fixed pool of entities, recycled rather than reallocated
//! - No rendering or platform dependencies

pub mod entity;
pub mod facade;
pub mod state;
pub mod world;

pub use entity::{Column, Player, Position};
pub use facade::GameFacade;
pub use state::{GamePhase, PendingSignals, StateMachine, is_main_game, is_no_move};
pub use world::GameWorld;
