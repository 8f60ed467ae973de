//! Terminal rendering for the tile game.
//!
//! Rendering goes through a plain framebuffer instead of a widget library, so
//! every screen can be drawn and inspected in tests without a terminal. Only
//! [`TerminalRenderer`] performs I/O.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod screens;
pub mod throttle;

pub use tile_flip_core as core;
pub use tile_flip_types as types;

pub use fb::{BoxChars, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, TileLayout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screens::{render_intro, render_report, render_settings, report_lines, INTRO_PAGES};
pub use throttle::FrameThrottle;
