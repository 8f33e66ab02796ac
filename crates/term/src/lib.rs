//! Terminal rendering for Neural Juggler.
//!
//! A small game-oriented rendering layer: the view draws a snapshot into a
//! framebuffer of styled cells, and the renderer flushes framebuffers to the
//! terminal. No widget toolkit is involved.
//!
//! - `fb`: cells, styles, rectangles, text helpers
//! - `game_view`: pure snapshot -> framebuffer mapping for both panels
//! - `renderer`: crossterm output with diffing between frames

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use neural_juggler_core as core;
pub use neural_juggler_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{GameView, Layout, Viewport, MIN_HEIGHT, MIN_WIDTH};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
