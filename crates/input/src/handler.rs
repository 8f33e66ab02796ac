//! Held-key repeat handler for the catcher.
//!
//! A press moves the catcher once; holding the key keeps it moving after a
//! short delay. Terminals that never emit key release events are handled with
//! a release timeout: repeated press events from the OS keep the key "held",
//! silence lets it go.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::types::{GameAction, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_RATE_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Tracks held arrow keys and emits repeated moves.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    last_key_time: Instant,
    delay_timer: u32,
    repeat_accumulator: u32,
    repeat_delay: u32,
    repeat_rate: u32,
    key_release_timeout_ms: u32,
}

// Terminals without release events would keep a tapped key held until the
// timeout; it must expire before the first repeat is due. A key held longer is
// kept alive by the terminal's own repeat events.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 100;

fn direction_of(code: KeyCode) -> HorizontalDirection {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            HorizontalDirection::Left
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            HorizontalDirection::Right
        }
        _ => HorizontalDirection::None,
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_RATE_MS)
    }

    pub fn with_config(repeat_delay: u32, repeat_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            last_key_time: Instant::now(),
            delay_timer: 0,
            repeat_accumulator: 0,
            repeat_delay,
            repeat_rate: repeat_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn held(&self) -> HorizontalDirection {
        self.horizontal
    }

    /// Register a key press. Returns the immediate move for a newly held arrow.
    ///
    /// Repeated presses of the held key only refresh the release timeout.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let dir = direction_of(code);
        if dir == HorizontalDirection::None {
            return None;
        }
        self.last_key_time = Instant::now();
        if self.horizontal == dir {
            return None;
        }
        self.horizontal = dir;
        self.delay_timer = 0;
        self.repeat_accumulator = 0;
        dir.action()
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let dir = direction_of(code);
        if dir != HorizontalDirection::None && self.horizontal == dir {
            self.release();
        }
    }

    /// Advance repeat timers and collect the moves due in `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        if self.last_key_time.elapsed() > Duration::from_millis(self.key_release_timeout_ms as u64) {
            self.release();
        }

        let Some(action) = self.horizontal.action() else {
            return actions;
        };

        let prev_delay = self.delay_timer;
        self.delay_timer = self.delay_timer.saturating_add(elapsed_ms);
        if self.delay_timer < self.repeat_delay {
            return actions;
        }

        let excess = if prev_delay < self.repeat_delay {
            self.delay_timer - self.repeat_delay
        } else {
            elapsed_ms
        };
        self.repeat_accumulator += excess;
        while self.repeat_accumulator >= self.repeat_rate {
            let _ = actions.try_push(action);
            self.repeat_accumulator -= self.repeat_rate;
        }
        actions
    }

    pub fn reset(&mut self) {
        self.release();
        self.last_key_time = Instant::now();
    }

    fn release(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.delay_timer = 0;
        self.repeat_accumulator = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_moves_once_then_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        assert!(ih.update(99).is_empty());
        // Exactly at the delay: nothing accumulated yet.
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(
            ih.update(50).as_slice(),
            &[GameAction::MoveLeft, GameAction::MoveLeft]
        );
    }

    #[test]
    fn test_os_repeat_press_does_not_double_move() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
        assert_eq!(ih.held(), HorizontalDirection::Right);
    }

    #[test]
    fn test_switching_direction_moves_immediately() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(ih.held(), HorizontalDirection::Right);
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(0, 10).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Char('d'));
        assert!(!ih.update(30).is_empty());

        // Releasing the other direction changes nothing.
        ih.handle_key_release(KeyCode::Left);
        assert_eq!(ih.held(), HorizontalDirection::Right);

        ih.handle_key_release(KeyCode::Right);
        assert!(ih.update(30).is_empty());
    }

    #[test]
    fn test_auto_release_after_timeout_without_release_events() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.key_release_timeout_ms = 50;

        ih.handle_key_press(KeyCode::Left);
        ih.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.held(), HorizontalDirection::None);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_timeout() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.key_release_timeout_ms = 50;

        ih.handle_key_press(KeyCode::Left);
        ih.last_key_time = Instant::now() - Duration::from_millis(51);
        assert_eq!(ih.handle_key_press(KeyCode::Char('7')), None);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.held(), HorizontalDirection::None);
    }

    #[test]
    fn test_release_timeout_expires_before_first_repeat() {
        assert!(DEFAULT_KEY_RELEASE_TIMEOUT_MS <= DEFAULT_REPEAT_DELAY_MS);
    }

    #[test]
    fn test_single_tap_without_release_event_moves_once() {
        let mut ih = InputHandler::new();
        let mut moves = usize::from(ih.handle_key_press(KeyCode::Left).is_some());

        // ~800ms of frames with no release and no further presses.
        for _ in 0..50 {
            std::thread::sleep(Duration::from_millis(16));
            moves += ih.update(16).len();
        }

        assert_eq!(moves, 1);
        assert_eq!(ih.held(), HorizontalDirection::None);
    }

    #[test]
    fn test_terminal_repeat_keeps_key_held() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.handle_key_press(KeyCode::Right);
        ih.last_key_time = Instant::now() - Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS as u64 + 1);

        // A repeat event for the held key refreshes the timeout without a move.
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
        assert_eq!(ih.update(130).as_slice(), &[GameAction::MoveRight]);
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }
}
