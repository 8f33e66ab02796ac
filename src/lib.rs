//! Neural Juggler (workspace facade crate).
//!
//! Re-exports the workspace crates as `neural_juggler::{core,input,term,types}`
//! and hosts the runner's configuration and logging setup.

pub mod config;
pub mod logging;

pub use neural_juggler_core as core;
pub use neural_juggler_input as input;
pub use neural_juggler_term as term;
pub use neural_juggler_types as types;
