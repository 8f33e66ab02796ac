//! Game state module - the dual-panel controller
//!
//! Ties together the puzzle panel, the reflex panel and the shared juggle
//! balls. One call to [`GameState::tick`] is one frame's update phase:
//!
//! 1. puzzle panel: count down to the next puzzle, advance the active one,
//!    resolve it (bonus on completion, one ball on failure or expiry)
//! 2. reflex panel: spawn on the spawn timer, move shapes, resolve catches and
//!    misses
//! 3. game over check (`lives <= 0`)
//!
//! Nothing advances while paused or after game over.

use arrayvec::{ArrayVec, Drain};

use crate::puzzle::Puzzle;
use crate::shape::{Shape, ShapeFate};
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Capacity of the per-frame event buffer.
pub const MAX_EVENTS: usize = 32;

/// Something that happened during an update, for logging and observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PuzzleStarted(PuzzleKind),
    PuzzleSolved(PuzzleKind),
    PuzzleFailed(PuzzleKind),
    PuzzleExpired(PuzzleKind),
    ShapeCaught(ShapeKind),
    WrongCatch(ShapeKind),
    TargetMissed(ShapeKind),
    Paused,
    Resumed,
    GameOver { score: u32 },
    Restarted { episode: u32 },
}

/// Timing knobs that scripted runs and tests may want to change.
///
/// Everything else (time limit, scoring, geometry) is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    /// Disable to keep the reflex panel empty.
    pub spawn_shapes: bool,
    pub shape_spawn_interval_ms: u32,
    pub first_puzzle_delay_ms: u32,
    pub puzzle_interval_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_shapes: true,
            shape_spawn_interval_ms: SHAPE_SPAWN_INTERVAL_MS,
            first_puzzle_delay_ms: FIRST_PUZZLE_DELAY_MS,
            puzzle_interval_ms: PUZZLE_INTERVAL_MS,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    rng: SimpleRng,
    seed: u32,
    tuning: Tuning,
    /// Monotonic run counter (increments on restart).
    episode: u32,
    score: u32,
    /// Best score of earlier runs in this process.
    best_score: u32,
    /// Juggle balls. May dip below zero when several penalties land in one frame.
    lives: i32,
    paused: bool,
    game_over: bool,
    // Reflex panel
    cursor_x: f32,
    target: ShapeKind,
    shapes: ArrayVec<Shape, MAX_SHAPES>,
    spawn_in_ms: u32,
    // Puzzle panel
    puzzle: Option<Puzzle>,
    next_puzzle_in_ms: u32,
    events: ArrayVec<GameEvent, MAX_EVENTS>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u32, tuning: Tuning) -> Self {
        let mut rng = SimpleRng::new(seed);
        let target = rng.choose(&ShapeKind::ALL);
        Self {
            rng,
            seed,
            tuning,
            episode: 0,
            score: 0,
            best_score: 0,
            lives: STARTING_LIVES,
            paused: false,
            game_over: false,
            cursor_x: CURSOR_START_X,
            target,
            shapes: ArrayVec::new(),
            spawn_in_ms: 0,
            puzzle: None,
            next_puzzle_in_ms: tuning.first_puzzle_delay_ms,
            events: ArrayVec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_running(&self) -> bool {
        self.phase() == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score seen in this process, including the current run.
    pub fn best_score(&self) -> u32 {
        self.best_score.max(self.score)
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn cursor_x(&self) -> f32 {
        self.cursor_x
    }

    pub fn target(&self) -> ShapeKind {
        self.target
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    pub fn next_puzzle_in_ms(&self) -> u32 {
        self.next_puzzle_in_ms
    }

    /// Replace the active puzzle (scripted scenarios and tests).
    pub fn set_puzzle(&mut self, puzzle: Puzzle) {
        self.puzzle = Some(puzzle);
    }

    /// Add a shape to the reflex panel. Returns false when the panel is full.
    pub fn push_shape(&mut self, shape: Shape) -> bool {
        self.shapes.try_push(shape).is_ok()
    }

    /// Override the target kind until the next restart.
    pub fn set_target(&mut self, target: ShapeKind) {
        self.target = target;
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Drain<'_, GameEvent, MAX_EVENTS> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase();
        out.score = self.score;
        out.best_score = self.best_score();
        out.lives = self.lives;
        out.cursor_x = self.cursor_x;
        out.target = self.target;
        out.shapes.clear();
        out.shapes.extend(self.shapes.iter().copied());
        out.puzzle.clone_from(&self.puzzle);
        out.next_puzzle_in_ms = self.next_puzzle_in_ms;
        out.episode = self.episode;
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Apply one input action.
    ///
    /// Returns true if the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if self.game_over {
                    self.restart();
                } else {
                    self.paused = !self.paused;
                    self.record(if self.paused {
                        GameEvent::Paused
                    } else {
                        GameEvent::Resumed
                    });
                }
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if !self.is_running() => false,
            GameAction::MoveLeft => self.move_cursor(-CURSOR_STEP),
            GameAction::MoveRight => self.move_cursor(CURSOR_STEP),
            GameAction::Digit(_) | GameAction::Minus | GameAction::Backspace | GameAction::Submit => {
                match self.puzzle.as_mut() {
                    Some(puzzle) => {
                        puzzle.handle_input(action);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Advance the game by `elapsed_ms`.
    ///
    /// Returns false when nothing advanced (paused or game over).
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }

        self.update_puzzle_panel(elapsed_ms);
        self.update_reflex_panel(elapsed_ms);

        if self.lives <= 0 {
            self.game_over = true;
            log::debug!("game over: score={} episode={}", self.score, self.episode);
            self.record(GameEvent::GameOver { score: self.score });
        }
        true
    }

    /// Full reset: balls, score, shapes, puzzle, cursor, timers and target.
    ///
    /// The RNG keeps running so the next run differs from the last one.
    pub fn restart(&mut self) {
        let best_score = self.best_score();
        let episode = self.episode.wrapping_add(1);
        let target = self.rng.choose(&ShapeKind::ALL);

        self.episode = episode;
        self.best_score = best_score;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.paused = false;
        self.game_over = false;
        self.cursor_x = CURSOR_START_X;
        self.target = target;
        self.shapes.clear();
        self.spawn_in_ms = 0;
        self.puzzle = None;
        self.next_puzzle_in_ms = self.tuning.first_puzzle_delay_ms;
        self.record(GameEvent::Restarted { episode });
    }

    fn move_cursor(&mut self, dx: f32) -> bool {
        let next = (self.cursor_x + dx).clamp(CURSOR_MARGIN, REFLEX_WIDTH - CURSOR_MARGIN);
        let moved = next != self.cursor_x;
        self.cursor_x = next;
        moved
    }

    fn update_puzzle_panel(&mut self, elapsed_ms: u32) {
        if self.puzzle.is_none() {
            self.next_puzzle_in_ms = self.next_puzzle_in_ms.saturating_sub(elapsed_ms);
            if self.next_puzzle_in_ms == 0 {
                let puzzle = Puzzle::generate(&mut self.rng);
                log::debug!("new puzzle: {}", puzzle.kind().as_str());
                self.record(GameEvent::PuzzleStarted(puzzle.kind()));
                self.puzzle = Some(puzzle);
            }
            return;
        }
        let Some(puzzle) = self.puzzle.as_mut() else {
            return;
        };

        puzzle.update(elapsed_ms);
        let kind = puzzle.kind();
        let outcome = if puzzle.is_completed() {
            Some(GameEvent::PuzzleSolved(kind))
        } else if puzzle.is_failed() {
            Some(GameEvent::PuzzleFailed(kind))
        } else if puzzle.is_expired() {
            Some(GameEvent::PuzzleExpired(kind))
        } else {
            None
        };

        if let Some(event) = outcome {
            match event {
                GameEvent::PuzzleSolved(_) => self.score += PUZZLE_BONUS,
                _ => self.lives -= 1,
            }
            self.puzzle = None;
            self.next_puzzle_in_ms = self.tuning.puzzle_interval_ms;
            self.record(event);
        }
    }

    fn update_reflex_panel(&mut self, elapsed_ms: u32) {
        if self.tuning.spawn_shapes {
            self.spawn_in_ms = self.spawn_in_ms.saturating_sub(elapsed_ms);
            if self.spawn_in_ms == 0 {
                let shape = Shape::spawn(&mut self.rng);
                if self.shapes.try_push(shape).is_err() {
                    log::trace!("reflex panel full, spawn skipped");
                }
                self.spawn_in_ms = self.tuning.shape_spawn_interval_ms.max(1);
            }
        }

        let Self {
            shapes,
            score,
            lives,
            events,
            cursor_x,
            target,
            ..
        } = self;
        let (cursor_x, target) = (*cursor_x, *target);

        // Filter in place so neighbouring removals in one frame are all honoured.
        shapes.retain(|shape| {
            shape.fall(elapsed_ms);
            let fate = shape.fate(cursor_x, target);
            let event = match fate {
                ShapeFate::Falling | ShapeFate::Escaped => None,
                ShapeFate::Caught => {
                    *score += CATCH_POINTS;
                    Some(GameEvent::ShapeCaught(shape.kind))
                }
                ShapeFate::WrongCatch => Some(GameEvent::WrongCatch(shape.kind)),
                ShapeFate::MissedTarget => Some(GameEvent::TargetMissed(shape.kind)),
            };
            if fate.costs_life() {
                *lives -= 1;
            }
            if let Some(event) = event {
                let _ = events.try_push(event);
            }
            !fate.removes_shape()
        });
    }

    fn record(&mut self, event: GameEvent) {
        let _ = self.events.try_push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Arithmetic, PuzzleBody, SequenceRecall, WordColor};

    fn quiet() -> GameState {
        GameState::with_tuning(
            12345,
            Tuning {
                spawn_shapes: false,
                ..Tuning::default()
            },
        )
    }

    fn shape(kind: ShapeKind, x: f32, y: f32) -> Shape {
        Shape::new(kind, ShapeColor::Blue, x, y, 2.0)
    }

    fn word_color(ink: StroopColor) -> Puzzle {
        Puzzle::new(PuzzleBody::WordColor(WordColor::new(StroopColor::Red, ink)))
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(7);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), STARTING_LIVES);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.cursor_x(), CURSOR_START_X);
        assert!(state.shapes().is_empty());
        assert!(state.puzzle().is_none());
        assert_eq!(state.next_puzzle_in_ms(), FIRST_PUZZLE_DELAY_MS);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        for _ in 0..400 {
            a.tick(TICK_MS);
            b.tick(TICK_MS);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_first_tick_spawns_a_shape() {
        let mut state = GameState::new(3);
        state.tick(TICK_MS);
        assert_eq!(state.shapes().len(), 1);

        // Nothing more until the spawn interval has elapsed.
        state.tick(SHAPE_SPAWN_INTERVAL_MS - 1);
        assert_eq!(state.shapes().len(), 1);
        state.tick(1);
        assert_eq!(state.shapes().len(), 2);
    }

    #[test]
    fn test_first_puzzle_appears_after_delay() {
        let mut state = quiet();
        state.tick(FIRST_PUZZLE_DELAY_MS - 1);
        assert!(state.puzzle().is_none());
        state.tick(1);
        assert!(state.puzzle().is_some());
        assert!(matches!(
            state.events().last(),
            Some(GameEvent::PuzzleStarted(_))
        ));
    }

    #[test]
    fn test_completed_puzzle_awards_bonus_and_schedules_next() {
        let mut state = quiet();
        state.set_puzzle(word_color(StroopColor::Blue));
        assert!(state.apply_action(GameAction::Digit(2)));
        state.tick(0);
        assert_eq!(state.score(), PUZZLE_BONUS);
        assert_eq!(state.lives(), STARTING_LIVES);
        assert!(state.puzzle().is_none());
        assert_eq!(state.next_puzzle_in_ms(), PUZZLE_INTERVAL_MS);
    }

    #[test]
    fn test_failed_puzzle_costs_one_ball() {
        let mut state = quiet();
        state.set_puzzle(word_color(StroopColor::Blue));
        state.apply_action(GameAction::Digit(1));
        state.tick(0);
        assert_eq!(state.lives(), STARTING_LIVES - 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.next_puzzle_in_ms(), PUZZLE_INTERVAL_MS);
    }

    #[test]
    fn test_expired_puzzle_costs_one_ball() {
        let mut state = quiet();
        state.set_puzzle(Puzzle::new(PuzzleBody::Arithmetic(Arithmetic::new(
            10,
            10,
            ArithOp::Add,
        ))));
        state.tick(PUZZLE_TIME_LIMIT_MS);
        assert!(state.puzzle().is_some());
        state.tick(1);
        assert!(state.puzzle().is_none());
        assert_eq!(state.lives(), STARTING_LIVES - 1);
        assert!(state
            .events()
            .contains(&GameEvent::PuzzleExpired(PuzzleKind::Arithmetic)));
    }

    #[test]
    fn test_sequence_puzzle_through_game() {
        let mut state = quiet();
        state.set_puzzle(Puzzle::new(PuzzleBody::Sequence(
            SequenceRecall::with_sequence([2, 4, 1]),
        )));
        state.tick(SEQUENCE_SHOW_MS + 1);
        for d in [2, 4, 1] {
            state.apply_action(GameAction::Digit(d));
        }
        state.tick(0);
        assert_eq!(state.score(), PUZZLE_BONUS);
    }

    #[test]
    fn test_catching_target_scores() {
        let mut state = quiet();
        state.set_target(ShapeKind::Circle);
        state.push_shape(shape(ShapeKind::Circle, CURSOR_START_X, CURSOR_Y - 10.0));
        state.tick(0);
        assert_eq!(state.score(), CATCH_POINTS);
        assert!(state.shapes().is_empty());
        assert_eq!(state.events(), &[GameEvent::ShapeCaught(ShapeKind::Circle)]);
    }

    #[test]
    fn test_catching_wrong_shape_costs_ball() {
        let mut state = quiet();
        state.set_target(ShapeKind::Circle);
        state.push_shape(shape(ShapeKind::Square, CURSOR_START_X, CURSOR_Y));
        state.tick(0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), STARTING_LIVES - 1);
        assert!(state.shapes().is_empty());
    }

    #[test]
    fn test_missed_target_costs_ball_other_shapes_do_not() {
        let mut state = quiet();
        state.set_target(ShapeKind::Triangle);
        state.push_shape(shape(ShapeKind::Triangle, 40.0, REFLEX_HEIGHT + 1.0));
        state.push_shape(shape(ShapeKind::Square, 80.0, REFLEX_HEIGHT + 1.0));
        state.tick(0);
        assert_eq!(state.lives(), STARTING_LIVES - 1);
        assert!(state.shapes().is_empty());
    }

    #[test]
    fn test_adjacent_removals_in_one_frame() {
        let mut state = quiet();
        state.set_target(ShapeKind::Circle);
        state.push_shape(shape(ShapeKind::Square, 50.0, 100.0));
        state.push_shape(shape(ShapeKind::Circle, CURSOR_START_X, CURSOR_Y));
        state.push_shape(shape(ShapeKind::Circle, CURSOR_START_X + 5.0, CURSOR_Y));
        state.push_shape(shape(ShapeKind::Square, 500.0, REFLEX_HEIGHT + 10.0));
        state.push_shape(shape(ShapeKind::Square, 60.0, 200.0));
        state.tick(0);
        assert_eq!(state.score(), 2 * CATCH_POINTS);
        let left: Vec<f32> = state.shapes().iter().map(|s| s.y).collect();
        assert_eq!(left, vec![100.0, 200.0]);
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        let mut state = quiet();
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.cursor_x(), CURSOR_START_X - CURSOR_STEP);
        for _ in 0..100 {
            state.apply_action(GameAction::MoveLeft);
        }
        assert_eq!(state.cursor_x(), CURSOR_MARGIN);
        assert!(!state.apply_action(GameAction::MoveLeft));
        for _ in 0..100 {
            state.apply_action(GameAction::MoveRight);
        }
        assert_eq!(state.cursor_x(), REFLEX_WIDTH - CURSOR_MARGIN);
    }

    #[test]
    fn test_lives_reaching_zero_ends_game() {
        let mut state = quiet();
        for _ in 0..STARTING_LIVES {
            state.set_puzzle(word_color(StroopColor::Green));
            state.apply_action(GameAction::Digit(4));
            state.tick(0);
        }
        assert_eq!(state.lives(), 0);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(state
            .events()
            .contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_pause_freezes_updates_and_input() {
        let mut state = quiet();
        state.apply_action(GameAction::Pause);
        assert_eq!(state.phase(), GamePhase::Paused);
        assert!(!state.tick(FIRST_PUZZLE_DELAY_MS * 2));
        assert!(state.puzzle().is_none());
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.cursor_x(), CURSOR_START_X);

        state.apply_action(GameAction::Pause);
        assert_eq!(state.phase(), GamePhase::Running);
        assert!(state.tick(FIRST_PUZZLE_DELAY_MS));
        assert!(state.puzzle().is_some());
    }

    #[test]
    fn test_pause_key_restarts_after_game_over() {
        let mut state = quiet();
        state.set_target(ShapeKind::Circle);
        for i in 0..3 {
            state.push_shape(shape(ShapeKind::Square, CURSOR_START_X + i as f32, CURSOR_Y));
        }
        state.tick(0);
        assert!(state.game_over());
        assert!(!state.tick(TICK_MS));
        assert!(!state.apply_action(GameAction::Digit(1)));

        state.apply_action(GameAction::Pause);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.lives(), STARTING_LIVES);
        assert_eq!(state.episode(), 1);
    }

    #[test]
    fn test_restart_resets_everything_but_best_score() {
        let mut state = quiet();
        state.set_target(ShapeKind::Square);
        state.push_shape(shape(ShapeKind::Square, CURSOR_START_X, CURSOR_Y));
        state.push_shape(shape(ShapeKind::Circle, 100.0, 100.0));
        state.set_puzzle(word_color(StroopColor::Yellow));
        state.apply_action(GameAction::MoveRight);
        state.tick(0);
        assert_eq!(state.score(), CATCH_POINTS);

        state.apply_action(GameAction::Restart);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), STARTING_LIVES);
        assert!(state.shapes().is_empty());
        assert!(state.puzzle().is_none());
        assert_eq!(state.cursor_x(), CURSOR_START_X);
        assert_eq!(state.next_puzzle_in_ms(), FIRST_PUZZLE_DELAY_MS);
        assert_eq!(state.best_score(), CATCH_POINTS);
        assert_eq!(state.phase(), GamePhase::Running);
    }

    #[test]
    fn test_puzzle_keys_without_puzzle_are_ignored() {
        let mut state = quiet();
        assert!(!state.apply_action(GameAction::Digit(3)));
        assert!(!state.apply_action(GameAction::Submit));
    }

    #[test]
    fn test_drain_events_empties_buffer() {
        let mut state = quiet();
        state.apply_action(GameAction::Pause);
        state.apply_action(GameAction::Pause);
        let drained: Vec<GameEvent> = state.drain_events().collect();
        assert_eq!(drained, vec![GameEvent::Paused, GameEvent::Resumed]);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_full_reflex_panel_skips_spawns() {
        let mut state = GameState::with_tuning(
            5,
            Tuning {
                first_puzzle_delay_ms: u32::MAX,
                ..Tuning::default()
            },
        );
        for i in 0..MAX_SHAPES {
            assert!(state.push_shape(shape(ShapeKind::Circle, 40.0 + i as f32, 0.0)));
        }
        assert!(!state.push_shape(shape(ShapeKind::Circle, 40.0, 0.0)));
        state.tick(0);
        assert_eq!(state.shapes().len(), MAX_SHAPES);
    }
}
