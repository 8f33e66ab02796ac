//! Render-facing copy of the game state.
//!
//! The terminal view draws from a [`GameSnapshot`] instead of borrowing
//! [`crate::GameState`], so rendering can never mutate gameplay. Use
//! `GameState::snapshot_into` to refresh one snapshot every frame without
//! reallocating.

use arrayvec::ArrayVec;

use crate::puzzle::Puzzle;
use crate::shape::Shape;
use crate::types::{GamePhase, ShapeKind, CURSOR_START_X, MAX_SHAPES, STARTING_LIVES};

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub best_score: u32,
    pub lives: i32,
    pub cursor_x: f32,
    pub target: ShapeKind,
    pub shapes: ArrayVec<Shape, MAX_SHAPES>,
    pub puzzle: Option<Puzzle>,
    pub next_puzzle_in_ms: u32,
    pub episode: u32,
    pub seed: u32,
}

impl GameSnapshot {
    /// Juggle balls left, floored at zero for display.
    pub fn balls(&self) -> u32 {
        self.lives.max(0) as u32
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: GamePhase::Running,
            score: 0,
            best_score: 0,
            lives: STARTING_LIVES,
            cursor_x: CURSOR_START_X,
            target: ShapeKind::Circle,
            shapes: ArrayVec::new(),
            puzzle: None,
            next_puzzle_in_ms: 0,
            episode: 0,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;
    use crate::types::{GameAction, ShapeColor};

    #[test]
    fn snapshot_into_reuses_and_overwrites() {
        let mut state = GameState::new(4);
        state.push_shape(Shape::new(ShapeKind::Square, ShapeColor::Red, 10.0, 10.0, 2.0));
        let mut snap = state.snapshot();
        assert_eq!(snap.shapes.len(), 1);

        state.apply_action(GameAction::Restart);
        state.snapshot_into(&mut snap);
        assert!(snap.shapes.is_empty());
        assert_eq!(snap.episode, 1);
    }

    #[test]
    fn balls_never_negative() {
        let mut snap = GameSnapshot::default();
        snap.lives = -2;
        assert_eq!(snap.balls(), 0);
        snap.lives = STARTING_LIVES;
        assert_eq!(snap.balls(), STARTING_LIVES as u32);
    }
}
