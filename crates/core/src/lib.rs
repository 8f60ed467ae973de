//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match engine: symbol generation, grid sizing,
//! parameter validation, and the session state machine. It has **no
//! dependencies** on the terminal or the score file, which makes it:
//!
//! - **Deterministic**: the same seed deals the same board
//! - **Testable**: every rule is exercised without a display
//! - **Portable**: any front end can drive it with clicks and ticks
//!
//! # Module Structure
//!
//! - [`symbols`]: bijective base-26 labels (`A`, ..., `Z`, `AA`, ...) and the symbol pool
//! - [`rng`]: seeded generator with unbiased Fisher-Yates shuffling
//! - [`grid`]: near-square grid sizing and row-major tile storage
//! - [`settings`]: parameter validation and the two-field settings form
//! - [`session`]: selection buffer, settle delay, scoring, win detection, replay
//! - [`snapshot`]: plain-data view of a session for renderers
//!
//! # Game Rules
//!
//! - The board holds `different_tiles` symbols, each repeated `group_size` times.
//! - Clicking a face-down tile flips it into the selection buffer.
//! - When the buffer holds `group_size` tiles, it is evaluated after the settle
//!   delay: all equal clears the group and scores one point, anything else
//!   flips the tiles back.
//! - The round is won when every group is cleared.
//!
//! # Example
//!
//! ```
//! use tile_flip_core::{GameParams, GameSession};
//! use tile_flip_types::Position;
//!
//! let params = GameParams::new(2, 2, 2000).unwrap();
//! let mut session = GameSession::new(params, 12345).with_settle_delay(0);
//!
//! // Clear every group by clicking tiles that share a symbol.
//! let symbol = session.grid().tiles()[0].symbol().to_string();
//! let same: Vec<Position> = session
//!     .grid()
//!     .iter()
//!     .filter(|(_, t)| t.symbol() == symbol)
//!     .map(|(p, _)| p)
//!     .collect();
//! for pos in same {
//!     session.click(pos);
//! }
//! assert_eq!(session.score(), 1);
//! ```

pub mod grid;
pub mod rng;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod symbols;

pub use tile_flip_types as types;

// Re-export commonly used types for convenience
pub use grid::{grid_dimensions, Grid, Tile};
pub use rng::SimpleRng;
pub use session::{
    ClickOutcome, Evaluation, GameSession, IgnoreReason, SessionOutcome, SessionReport, TileEvent,
};
pub use settings::{GameParams, ParamError, ParamField, SettingsForm};
pub use snapshot::SessionSnapshot;
pub use symbols::{shuffled_pool, symbol_for_index, symbol_pool};
