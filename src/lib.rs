//! Tile Flip (workspace facade crate).
//!
//! Re-exports the engine, input, score and terminal crates under one roof and
//! holds the pieces the binary is assembled from: configuration, argument
//! parsing and the screen flow.

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;

pub use tile_flip_core as core;
pub use tile_flip_input as input;
pub use tile_flip_scores as scores;
pub use tile_flip_term as term;
pub use tile_flip_types as types;

pub use app::{App, Control, Screen};
pub use cli::{parse_args, Command, PlayArgs};
pub use clock::TickClock;
pub use config::GameConfig;
