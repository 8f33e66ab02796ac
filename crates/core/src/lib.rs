//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management for both
//! panels. It has **zero dependencies** on terminal, input or I/O, making it:
//!
//! - **Deterministic**: same seed and same inputs give the same run
//! - **Testable**: every rule is exercised by unit tests
//! - **Allocation-free per tick**: fixed-capacity lists for shapes, puzzle
//!   state and events
//!
//! # Module Structure
//!
//! - [`game_state`]: the controller; score, juggle balls, pause/game over,
//!   both panels
//! - [`puzzle`]: sequence recall, arithmetic and word-color puzzles
//! - [`shape`]: falling shapes, spawning and catch/miss resolution
//! - [`rng`]: seedable LCG used for every random roll
//! - [`snapshot`]: render-facing copy of the state
//!
//! # Example
//!
//! ```
//! use neural_juggler_core::GameState;
//! use neural_juggler_types::{GameAction, GamePhase, TICK_MS};
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::MoveLeft);
//! game.tick(TICK_MS);
//!
//! // The first shape drops in on the first frame.
//! assert_eq!(game.shapes().len(), 1);
//!
//! game.apply_action(GameAction::Pause);
//! assert_eq!(game.phase(), GamePhase::Paused);
//! ```
//!
//! # Timing
//!
//! All timers are milliseconds advanced by [`GameState::tick`]. The runner calls
//! it once per 16ms frame; shape speeds are defined per 16ms tick and scaled by
//! the elapsed time.

pub mod game_state;
pub mod puzzle;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use neural_juggler_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameEvent, GameState, Tuning, MAX_EVENTS};
pub use puzzle::{Arithmetic, Puzzle, PuzzleBody, PuzzleStatus, SequenceRecall, WordColor};
pub use rng::SimpleRng;
pub use shape::{Shape, ShapeFate};
pub use snapshot::GameSnapshot;
