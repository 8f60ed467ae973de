//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data types used throughout the workspace.
//! Nothing here depends on the engine, the terminal, or the score log, so the
//! same types flow from input mapping through the engine into rendering.
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SETTLE_DELAY_MS` | 500 | Pause between a full selection and its evaluation |
//! | `DEFAULT_MAX_TILES` | 2000 | Soft cap on `different_tiles * group_size` |
//! | `ALPHABET_LEN` | 26 | Letters available to the symbol generator |
//!
//! # Cursor Repeat Timing
//!
//! Held direction keys move the cursor once, then auto-repeat:
//!
//! - `DEFAULT_REPEAT_DELAY_MS`: 180ms - time before auto-repeat starts
//! - `DEFAULT_REPEAT_RATE_MS`: 60ms - interval between auto-repeats
//!
//! # Examples
//!
//! ```
//! use tile_flip_types::{Direction, Position};
//!
//! let pos = Position::new(1, 2);
//! assert_eq!(pos.step(Direction::Left, 3, 4), Position::new(1, 1));
//! ```

/// Fixed timestep (milliseconds).
pub const TICK_MS: u32 = 16;

/// Conventional settle delay before a full selection is evaluated.
pub const SETTLE_DELAY_MS: u32 = 500;

/// Legacy bound: a product of `different_tiles * group_size` at or above this is rejected.
pub const DEFAULT_MAX_TILES: u32 = 2000;

/// Number of letters in the symbol alphabet (A..=Z).
pub const ALPHABET_LEN: usize = 26;

/// Cursor auto-repeat timing (milliseconds)
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 180;
pub const DEFAULT_REPEAT_RATE_MS: u32 = 60;

/// Default score log file, relative to the working directory.
pub const DEFAULT_SCORE_FILE: &str = "player_data.txt";

/// Grid coordinate of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move one cell in `dir`, clamped to a `rows x cols` grid.
    pub fn step(self, dir: Direction, rows: usize, cols: usize) -> Self {
        let max_row = rows.saturating_sub(1);
        let max_col = cols.saturating_sub(1);
        let (row, col) = match dir {
            Direction::Up => (self.row.saturating_sub(1), self.col),
            Direction::Down => ((self.row + 1).min(max_row), self.col),
            Direction::Left => (self.row, self.col.saturating_sub(1)),
            Direction::Right => (self.row, (self.col + 1).min(max_col)),
        };
        Self {
            row: row.min(max_row),
            col: col.min(max_col),
        }
    }
}

/// Cursor direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Play-screen actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Move(Direction),
    /// Flip the tile under the cursor.
    Flip,
    /// Flip the tile at a position (mouse click).
    FlipAt(Position),
    /// Skip the remaining settle delay.
    Resolve,
}

/// Settings form editing input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Char(char),
    Backspace,
    NextField,
    PrevField,
    Submit,
    Cancel,
}

/// Player answer to the end-of-round question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayDecision {
    Accept,
    Decline,
}

/// Engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Selection buffer not full; clicks are accepted.
    #[default]
    AwaitingSelection,
    /// Buffer is full and waiting for the settle delay.
    Evaluating,
    /// Every group is cleared.
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::AwaitingSelection => "awaiting_selection",
            Phase::Evaluating => "evaluating",
            Phase::Finished => "finished",
        }
    }
}

/// What a renderer should show for one tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TileFace {
    #[default]
    Hidden,
    /// Face up, part of the current selection.
    Shown(String),
    /// Matched and permanently removed from play.
    Cleared(String),
}

impl TileFace {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            TileFace::Hidden => None,
            TileFace::Shown(s) | TileFace::Cleared(s) => Some(s.as_str()),
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, TileFace::Hidden)
    }
}
