//! Cursor auto-repeat for held direction keys.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::direction_for;
use crate::types::{Direction, GameAction, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_RATE_MS};

/// Tracks the held direction and its repeat timers.
#[derive(Debug, Clone)]
pub struct CursorRepeat {
    held: Option<Direction>,
    last_key_time: Instant,
    delay_timer: u32,
    rate_accumulator: u32,
    repeat_delay: u32,
    repeat_rate: u32,
    key_release_timeout_ms: u32,
}

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl Default for CursorRepeat {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorRepeat {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_RATE_MS)
    }

    pub fn with_config(repeat_delay: u32, repeat_rate: u32) -> Self {
        Self {
            held: None,
            last_key_time: Instant::now(),
            delay_timer: 0,
            rate_accumulator: 0,
            repeat_delay,
            repeat_rate: repeat_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// A direction key went down. Returns the immediate move, if any.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let dir = direction_for(code)?;
        self.last_key_time = Instant::now();

        if self.held == Some(dir) {
            // Repeated presses move on their own until auto-repeat takes over.
            if self.delay_timer < self.repeat_delay {
                return Some(GameAction::Move(dir));
            }
            return None;
        }

        self.held = Some(dir);
        self.delay_timer = 0;
        self.rate_accumulator = 0;
        Some(GameAction::Move(dir))
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(dir) = direction_for(code) {
            if self.held == Some(dir) {
                self.release();
            }
        }
    }

    fn release(&mut self) {
        self.held = None;
        self.delay_timer = 0;
        self.rate_accumulator = 0;
    }

    /// Advance timers, returning any auto-repeat moves.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 16> {
        let mut actions = ArrayVec::<GameAction, 16>::new();

        // Auto-release when terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms {
            self.release();
        }

        let Some(dir) = self.held else {
            return actions;
        };

        let prev = self.delay_timer;
        self.delay_timer = self.delay_timer.saturating_add(elapsed_ms);
        if self.delay_timer >= self.repeat_delay {
            let excess = if prev < self.repeat_delay {
                self.delay_timer - self.repeat_delay
            } else {
                elapsed_ms
            };
            self.rate_accumulator += excess;

            while self.rate_accumulator >= self.repeat_rate {
                let _ = actions.try_push(GameAction::Move(dir));
                self.rate_accumulator -= self.repeat_rate;
            }
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_hold() -> CursorRepeat {
        // Release timeout long enough that tests never hit it.
        CursorRepeat::with_config(100, 20).with_key_release_timeout_ms(60_000)
    }

    #[test]
    fn first_press_moves_immediately() {
        let mut h = long_hold();
        assert_eq!(
            h.handle_key_press(KeyCode::Right),
            Some(GameAction::Move(Direction::Right))
        );
        assert_eq!(h.held, Some(Direction::Right));
    }

    #[test]
    fn non_direction_keys_are_ignored() {
        let mut h = long_hold();
        assert_eq!(h.handle_key_press(KeyCode::Enter), None);
        assert_eq!(h.held, None);
    }

    #[test]
    fn repeats_after_delay() {
        let mut h = long_hold();
        h.handle_key_press(KeyCode::Down);

        assert!(h.update(99).is_empty());
        // 1ms past the delay is not a whole repeat interval yet.
        assert!(h.update(2).is_empty());
        // 21ms in total past the delay: one repeat.
        let actions = h.update(19);
        assert_eq!(actions.as_slice(), &[GameAction::Move(Direction::Down)]);

        let actions = h.update(40);
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn quick_taps_are_not_lost() {
        let mut h = long_hold();
        assert!(h.handle_key_press(KeyCode::Left).is_some());
        h.update(16);
        assert!(h.handle_key_press(KeyCode::Left).is_some());
    }

    #[test]
    fn presses_after_repeat_starts_are_absorbed() {
        let mut h = long_hold();
        h.handle_key_press(KeyCode::Left);
        h.update(150);
        assert_eq!(h.handle_key_press(KeyCode::Left), None);
    }

    #[test]
    fn release_stops_repeat() {
        let mut h = long_hold();
        h.handle_key_press(KeyCode::Char('k'));
        h.handle_key_release(KeyCode::Up);
        assert_eq!(h.held, None);
        assert!(h.update(500).is_empty());
    }

    #[test]
    fn releasing_other_direction_keeps_hold() {
        let mut h = long_hold();
        h.handle_key_press(KeyCode::Up);
        h.handle_key_release(KeyCode::Down);
        assert_eq!(h.held, Some(Direction::Up));
    }

    #[test]
    fn switching_direction_restarts_delay() {
        let mut h = long_hold();
        h.handle_key_press(KeyCode::Left);
        h.update(90);
        assert_eq!(
            h.handle_key_press(KeyCode::Right),
            Some(GameAction::Move(Direction::Right))
        );
        assert!(h.update(90).is_empty());
    }

    #[test]
    fn timeout_releases_without_release_events() {
        let mut h = CursorRepeat::with_config(100, 20).with_key_release_timeout_ms(0);
        h.handle_key_press(KeyCode::Left);
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(h.update(500).is_empty());
        assert_eq!(h.held, None);
    }
}
