//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used
//! by the rules engine, the terminal view and the input layer alike.
//!
//! # Logical Screen
//!
//! Game logic runs in a fixed logical resolution that the terminal view scales
//! to whatever is available:
//!
//! - **Screen**: 1200 x 800 logical pixels
//! - **Puzzle panel**: left half (600 wide)
//! - **Reflex panel**: right half (600 wide); shape and cursor coordinates are
//!   local to this panel
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SHAPE_SPAWN_INTERVAL_MS` | 1500 | Time between shape spawns |
//! | `PUZZLE_TIME_LIMIT_MS` | 5000 | Time allowed to answer a puzzle |
//! | `SEQUENCE_SHOW_MS` | 2000 | Sequence display phase |
//! | `FIRST_PUZZLE_DELAY_MS` | 3000 | Delay before the first puzzle of a run |
//! | `PUZZLE_INTERVAL_MS` | 10000 | Delay between a resolved puzzle and the next |
//!
//! # Examples
//!
//! ```
//! use neural_juggler_types::{GameAction, ShapeKind, StroopColor, STARTING_LIVES};
//!
//! assert_eq!(ShapeKind::Triangle.plural_label(), "TRIANGLES");
//!
//! // Word-color answers are numbered 1..=4.
//! assert_eq!(StroopColor::from_answer_digit(2), Some(StroopColor::Blue));
//!
//! assert_eq!(GameAction::Digit(7).digit(), Some(7));
//! assert_eq!(STARTING_LIVES, 3);
//! ```

/// Logical screen width (both panels).
pub const SCREEN_WIDTH: f32 = 1200.0;

/// Logical screen height.
pub const SCREEN_HEIGHT: f32 = 800.0;

/// Width of the reflex panel; shape x coordinates are in `0..REFLEX_WIDTH`.
pub const REFLEX_WIDTH: f32 = SCREEN_WIDTH / 2.0;

/// Height of the reflex panel; shapes below this are off screen.
pub const REFLEX_HEIGHT: f32 = SCREEN_HEIGHT;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Juggle balls at the start of every run.
pub const STARTING_LIVES: i32 = 3;

/// Points for catching a target shape.
pub const CATCH_POINTS: u32 = 10;

/// Points for completing a puzzle.
pub const PUZZLE_BONUS: u32 = 50;

/// Fixed vertical position of the catcher.
pub const CURSOR_Y: f32 = REFLEX_HEIGHT - 50.0;

/// Catcher x at the start of a run.
pub const CURSOR_START_X: f32 = REFLEX_WIDTH / 2.0;

/// Horizontal margin the catcher keeps from the panel edges.
pub const CURSOR_MARGIN: f32 = 20.0;

/// Distance moved per move action.
pub const CURSOR_STEP: f32 = 20.0;

/// Catch radius around the catcher.
pub const CATCH_RADIUS: f32 = 40.0;

/// Half-extent of every shape.
pub const SHAPE_SIZE: f32 = 30.0;

/// Slowest fall speed, logical pixels per tick.
pub const SHAPE_MIN_SPEED: f32 = 2.0;

/// Fastest fall speed, logical pixels per tick.
pub const SHAPE_MAX_SPEED: f32 = 5.0;

/// Shapes spawn this far inside the panel edges.
pub const SHAPE_SPAWN_MARGIN: f32 = 30.0;

/// Spawn height (above the visible area).
pub const SHAPE_SPAWN_Y: f32 = -30.0;

/// Time between shape spawns.
pub const SHAPE_SPAWN_INTERVAL_MS: u32 = 1500;

/// Capacity of the falling-shape list. Spawns are skipped when full.
pub const MAX_SHAPES: usize = 16;

/// Time allowed to answer a puzzle.
pub const PUZZLE_TIME_LIMIT_MS: u32 = 5000;

/// Display phase of the sequence-recall puzzle.
pub const SEQUENCE_SHOW_MS: u32 = 2000;

/// Each sequence step stays highlighted this long during the display phase.
pub const SEQUENCE_STEP_MS: u32 = 500;

/// Number of digits in a sequence-recall puzzle.
pub const SEQUENCE_LEN: usize = 3;

/// Maximum characters accepted in the arithmetic answer field.
pub const ANSWER_MAX_LEN: usize = 8;

/// Delay before the first puzzle of a run.
pub const FIRST_PUZZLE_DELAY_MS: u32 = 3000;

/// Delay between a resolved puzzle and the next one.
pub const PUZZLE_INTERVAL_MS: u32 = 10_000;

/// Delay before held arrow keys start repeating.
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 120;

/// Interval between repeated moves while an arrow key is held.
pub const DEFAULT_REPEAT_RATE_MS: u32 = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_sits_inside_reflex_panel() {
        assert!(CURSOR_Y < REFLEX_HEIGHT);
        assert!(CURSOR_START_X > CURSOR_MARGIN);
        assert!(CURSOR_START_X < REFLEX_WIDTH - CURSOR_MARGIN);
    }

    #[test]
    fn sequence_display_fits_inside_time_limit() {
        assert!(SEQUENCE_SHOW_MS < PUZZLE_TIME_LIMIT_MS);
        assert!(SEQUENCE_STEP_MS * SEQUENCE_LEN as u32 <= SEQUENCE_SHOW_MS);
    }
}

/// The three falling shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Triangle,
    Square,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Square];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Square => "square",
        }
    }

    /// Label used by the "CATCH: ..." banner.
    pub fn plural_label(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "CIRCLES",
            ShapeKind::Triangle => "TRIANGLES",
            ShapeKind::Square => "SQUARES",
        }
    }
}

/// Fill colors for falling shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl ShapeColor {
    pub const ALL: [ShapeColor; 6] = [
        ShapeColor::Red,
        ShapeColor::Blue,
        ShapeColor::Green,
        ShapeColor::Yellow,
        ShapeColor::Purple,
        ShapeColor::Orange,
    ];
}

/// Colors used by the word-color puzzle.
///
/// The declaration order is the answer order: key 1 is red, 2 blue,
/// 3 green, 4 yellow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StroopColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl StroopColor {
    pub const ALL: [StroopColor; 4] = [
        StroopColor::Red,
        StroopColor::Blue,
        StroopColor::Green,
        StroopColor::Yellow,
    ];

    /// The word shown on screen.
    pub fn word(&self) -> &'static str {
        match self {
            StroopColor::Red => "RED",
            StroopColor::Blue => "BLUE",
            StroopColor::Green => "GREEN",
            StroopColor::Yellow => "YELLOW",
        }
    }

    /// Answer key for this color (1..=4).
    pub fn answer_digit(&self) -> u8 {
        match self {
            StroopColor::Red => 1,
            StroopColor::Blue => 2,
            StroopColor::Green => 3,
            StroopColor::Yellow => 4,
        }
    }

    pub fn from_answer_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(StroopColor::Red),
            2 => Some(StroopColor::Blue),
            3 => Some(StroopColor::Green),
            4 => Some(StroopColor::Yellow),
            _ => None,
        }
    }
}

/// Operators used by the arithmetic puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
}

impl ArithOp {
    pub const ALL: [ArithOp; 3] = [ArithOp::Add, ArithOp::Sub, ArithOp::Mul];

    pub fn symbol(&self) -> char {
        match self {
            ArithOp::Add => '+',
            ArithOp::Sub => '-',
            ArithOp::Mul => '*',
        }
    }

    pub fn apply(&self, lhs: i32, rhs: i32) -> i32 {
        match self {
            ArithOp::Add => lhs + rhs,
            ArithOp::Sub => lhs - rhs,
            ArithOp::Mul => lhs * rhs,
        }
    }
}

/// The three puzzle variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleKind {
    /// Watch a digit sequence, then type it back.
    Sequence,
    /// Solve a two-operand sum, difference or product.
    Arithmetic,
    /// Name the ink color of a color word.
    WordColor,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 3] = [
        PuzzleKind::Sequence,
        PuzzleKind::Arithmetic,
        PuzzleKind::WordColor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzleKind::Sequence => "sequence",
            PuzzleKind::Arithmetic => "arithmetic",
            PuzzleKind::WordColor => "word-color",
        }
    }

    /// Panel heading.
    pub fn title(&self) -> &'static str {
        match self {
            PuzzleKind::Sequence => "SIMON SAYS",
            PuzzleKind::Arithmetic => "MATH PROBLEM",
            PuzzleKind::WordColor => "STROOP TEST",
        }
    }
}

/// Game actions that can be applied to modify game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the catcher left
    MoveLeft,
    /// Move the catcher right
    MoveRight,
    /// A digit key (0-9)
    Digit(u8),
    /// The minus key (negative arithmetic answers)
    Minus,
    /// Delete the last typed character
    Backspace,
    /// Submit the typed answer
    Submit,
    /// Toggle pause (restarts when the game is over)
    Pause,
    /// Restart the game
    Restart,
}

impl GameAction {
    /// The digit carried by a digit action.
    pub fn digit(&self) -> Option<u8> {
        match self {
            GameAction::Digit(d) => Some(*d),
            _ => None,
        }
    }
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
}
