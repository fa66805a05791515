//! Space Invaders simulation core.
//!
//! Core modules:
//! - `formation`: the enemy grid, its sweep cadence and column bookkeeping
//! - `combat`: per-tick collision rules
//! - `actors`: timer-driven ship, bullet, mystery and explosion lifecycles
//! - `compute`: the Playing-scene round controller
//! - `scene`: Menu / Playing / RoundTransition / GameOver state machine
//!
//! The core never draws or plays anything itself; each tick yields an
//! `output::Frame` of draw commands and audio cues for the front-end.

pub mod actors;
pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod formation;
pub mod output;
pub mod scene;
pub mod session;
pub mod tuning;

pub use error::FormationError;
pub use events::{GameEvent, HeldKeys, Key};
pub use output::{AudioCue, DrawCommand, Frame, Sound};
pub use scene::{Control, Game, Scene, Tick};
