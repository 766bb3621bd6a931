//! Calculator state
//!
//! Routes edits from either side of the calculator through the engine.

pub mod state;

pub use state::{Action, CalcState, Direction, Field, Snapshot};
