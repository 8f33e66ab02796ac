//! Puzzle module - the three timed mini-games of the puzzle panel
//!
//! A [`Puzzle`] wraps one variant body with the shared bookkeeping: a
//! countdown against [`PUZZLE_TIME_LIMIT_MS`] and a resolution status. Each
//! variant only decides whether an input is a right or wrong answer; the
//! wrapper turns that verdict into a status exactly once.
//!
//! - [`SequenceRecall`]: watch three digits (1-4), then type them back in order.
//!   Input is ignored during the display phase and the countdown restarts when
//!   the display phase ends.
//! - [`Arithmetic`]: type the result of `a op b` and press enter. Anything that
//!   does not parse as an integer is a wrong answer.
//! - [`WordColor`]: a color word is printed in a different ink; answer with the
//!   key of the ink, not the word.

use arrayvec::{ArrayString, ArrayVec};

use crate::rng::SimpleRng;
use crate::types::{
    ArithOp, GameAction, PuzzleKind, StroopColor, ANSWER_MAX_LEN, PUZZLE_TIME_LIMIT_MS,
    SEQUENCE_LEN, SEQUENCE_SHOW_MS, SEQUENCE_STEP_MS,
};

/// Resolution status of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleStatus {
    Active,
    Completed,
    Failed,
}

/// Sequence-recall state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecall {
    sequence: ArrayVec<u8, SEQUENCE_LEN>,
    entered: ArrayVec<u8, SEQUENCE_LEN>,
    showing: bool,
}

impl SequenceRecall {
    pub fn generate(rng: &mut SimpleRng) -> Self {
        let mut sequence = ArrayVec::new();
        for _ in 0..SEQUENCE_LEN {
            sequence.push(rng.range_inclusive(1, 4) as u8);
        }
        Self {
            sequence,
            entered: ArrayVec::new(),
            showing: true,
        }
    }

    /// Build from a known sequence (starts in the display phase).
    pub fn with_sequence(sequence: [u8; SEQUENCE_LEN]) -> Self {
        Self {
            sequence: ArrayVec::from(sequence),
            entered: ArrayVec::new(),
            showing: true,
        }
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn entered(&self) -> &[u8] {
        &self.entered
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    fn handle_input(&mut self, action: GameAction) -> Option<bool> {
        if self.showing {
            return None;
        }
        let digit = action.digit().filter(|d| (1..=4).contains(d))?;
        if self.entered.try_push(digit).is_err() {
            return None;
        }
        if self.entered.len() == self.sequence.len() {
            Some(self.entered == self.sequence)
        } else {
            None
        }
    }
}

/// Arithmetic state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arithmetic {
    lhs: i32,
    rhs: i32,
    op: ArithOp,
    entry: ArrayString<ANSWER_MAX_LEN>,
}

impl Arithmetic {
    pub fn generate(rng: &mut SimpleRng) -> Self {
        let lhs = rng.range_inclusive(10, 99);
        let rhs = rng.range_inclusive(10, 99);
        let op = rng.choose(&ArithOp::ALL);
        Self::new(lhs, rhs, op)
    }

    pub fn new(lhs: i32, rhs: i32, op: ArithOp) -> Self {
        Self {
            lhs,
            rhs,
            op,
            entry: ArrayString::new(),
        }
    }

    pub fn lhs(&self) -> i32 {
        self.lhs
    }

    pub fn rhs(&self) -> i32 {
        self.rhs
    }

    pub fn op(&self) -> ArithOp {
        self.op
    }

    pub fn answer(&self) -> i32 {
        self.op.apply(self.lhs, self.rhs)
    }

    /// Text typed so far.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    fn handle_input(&mut self, action: GameAction) -> Option<bool> {
        match action {
            GameAction::Backspace => {
                self.entry.pop();
                None
            }
            GameAction::Submit => Some(self.check_entry()),
            GameAction::Digit(d) => {
                if let Some(ch) = char::from_digit(d as u32, 10) {
                    let _ = self.entry.try_push(ch);
                }
                None
            }
            GameAction::Minus => {
                let _ = self.entry.try_push('-');
                None
            }
            _ => None,
        }
    }

    /// Non-numeric text is a wrong answer.
    fn check_entry(&self) -> bool {
        match self.entry.parse::<i32>() {
            Ok(value) => value == self.answer(),
            Err(_) => false,
        }
    }
}

/// Word-color naming state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordColor {
    word: StroopColor,
    ink: StroopColor,
}

impl WordColor {
    /// Roll a word and an ink that never matches it.
    pub fn generate(rng: &mut SimpleRng) -> Self {
        let word = rng.choose(&StroopColor::ALL);
        let mut others = ArrayVec::<StroopColor, 4>::new();
        others.extend(StroopColor::ALL.iter().copied().filter(|&c| c != word));
        let ink = rng.choose(others.as_slice());
        Self { word, ink }
    }

    pub fn new(word: StroopColor, ink: StroopColor) -> Self {
        Self { word, ink }
    }

    pub fn word(&self) -> StroopColor {
        self.word
    }

    pub fn ink(&self) -> StroopColor {
        self.ink
    }

    fn handle_input(&mut self, action: GameAction) -> Option<bool> {
        let answer = action.digit().and_then(StroopColor::from_answer_digit)?;
        Some(answer == self.ink)
    }
}

/// Variant-specific puzzle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleBody {
    Sequence(SequenceRecall),
    Arithmetic(Arithmetic),
    WordColor(WordColor),
}

impl PuzzleBody {
    pub fn kind(&self) -> PuzzleKind {
        match self {
            PuzzleBody::Sequence(_) => PuzzleKind::Sequence,
            PuzzleBody::Arithmetic(_) => PuzzleKind::Arithmetic,
            PuzzleBody::WordColor(_) => PuzzleKind::WordColor,
        }
    }
}

/// The active puzzle of the puzzle panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    body: PuzzleBody,
    status: PuzzleStatus,
    elapsed_ms: u32,
    time_limit_ms: u32,
}

impl Puzzle {
    pub fn new(body: PuzzleBody) -> Self {
        Self {
            body,
            status: PuzzleStatus::Active,
            elapsed_ms: 0,
            time_limit_ms: PUZZLE_TIME_LIMIT_MS,
        }
    }

    /// Roll a random variant and its parameters.
    pub fn generate(rng: &mut SimpleRng) -> Self {
        let kind = rng.choose(&PuzzleKind::ALL);
        Self::generate_kind(kind, rng)
    }

    pub fn generate_kind(kind: PuzzleKind, rng: &mut SimpleRng) -> Self {
        let body = match kind {
            PuzzleKind::Sequence => PuzzleBody::Sequence(SequenceRecall::generate(rng)),
            PuzzleKind::Arithmetic => PuzzleBody::Arithmetic(Arithmetic::generate(rng)),
            PuzzleKind::WordColor => PuzzleBody::WordColor(WordColor::generate(rng)),
        };
        Self::new(body)
    }

    pub fn kind(&self) -> PuzzleKind {
        self.body.kind()
    }

    pub fn body(&self) -> &PuzzleBody {
        &self.body
    }

    pub fn status(&self) -> PuzzleStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == PuzzleStatus::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.status == PuzzleStatus::Failed
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Feed one key to the variant. Ignored once the puzzle is resolved.
    pub fn handle_input(&mut self, action: GameAction) {
        if self.status != PuzzleStatus::Active {
            return;
        }
        let verdict = match &mut self.body {
            PuzzleBody::Sequence(p) => p.handle_input(action),
            PuzzleBody::Arithmetic(p) => p.handle_input(action),
            PuzzleBody::WordColor(p) => p.handle_input(action),
        };
        if let Some(correct) = verdict {
            self.status = if correct {
                PuzzleStatus::Completed
            } else {
                PuzzleStatus::Failed
            };
        }
    }

    /// Advance the countdown and end the sequence display phase when due.
    pub fn update(&mut self, elapsed_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if let PuzzleBody::Sequence(seq) = &mut self.body {
            if seq.showing && self.elapsed_ms > SEQUENCE_SHOW_MS {
                seq.showing = false;
                // The answer window starts when the sequence disappears.
                self.elapsed_ms = 0;
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed_ms > self.time_limit_ms
    }

    pub fn time_remaining_ms(&self) -> u32 {
        self.time_limit_ms.saturating_sub(self.elapsed_ms)
    }

    /// Remaining time as a fraction of the limit, for the timer bar.
    pub fn remaining_fraction(&self) -> f32 {
        if self.time_limit_ms == 0 {
            return 0.0;
        }
        self.time_remaining_ms() as f32 / self.time_limit_ms as f32
    }

    /// Sequence step to highlight while the sequence is on display.
    pub fn highlight_index(&self) -> Option<usize> {
        match &self.body {
            PuzzleBody::Sequence(seq) if seq.showing && self.elapsed_ms < SEQUENCE_SHOW_MS => {
                let step = (self.elapsed_ms / SEQUENCE_STEP_MS) as usize;
                Some(step % seq.sequence.len())
            }
            _ => None,
        }
    }

    /// One-line prompt for the current phase.
    pub fn instructions(&self) -> &'static str {
        match &self.body {
            PuzzleBody::Sequence(seq) if seq.showing => "Watch the sequence!",
            PuzzleBody::Sequence(_) => "Enter sequence (1-4):",
            PuzzleBody::Arithmetic(_) => "Enter answer and press ENTER:",
            PuzzleBody::WordColor(_) => "What COLOR is this word?",
        }
    }
}
