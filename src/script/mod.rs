//! Gesture scripts: replayable pointer input
//!
//! A script is a sequence of gestures, one per line by convention:
//!
//! ```text
//! // move kinase out of the way, then flip it
//! drag kinase by 120, 0 steps 4
//! press kinase at 220, 100 secondary
//! ```

pub mod ast;
mod grammar;
pub mod lexer;
mod replay;

pub use ast::*;
pub use grammar::parse;
pub use replay::{replay, ReplayError, StepOutcome};
