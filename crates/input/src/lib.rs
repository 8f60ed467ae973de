//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`crate::types`] inputs and provides a
//! cursor auto-repeat handler suitable for terminal environments (including
//! terminals without key-release events).

pub mod handler;
pub mod map;

pub use tile_flip_types as types;

pub use handler::CursorRepeat;
pub use map::{
    direction_for, handle_form_key, handle_key_event, handle_replay_key, is_interrupt,
    mouse_click, should_quit,
};
