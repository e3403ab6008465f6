//! # markov-engine
//!
//! An interpreter for Markov algorithms: an ordered list of string
//! rewriting rules applied to a working string until a terminating rule
//! fires or no rule applies.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, Not Mutation**: every engine transition returns a new
//!    `Markov` value. Hosts keep whatever history they like and compare
//!    snapshots by value.
//!
//! 2. **First Rule, Leftmost Occurrence**: one step fires the first rule
//!    that applies and rewrites only the leftmost match of its pattern.
//!
//! 3. **Loops Are the Host's Problem**: the engine never iterates on its
//!    own. Step limits and repeated-state detection live in `host`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: rules are kept in an `im::Vector`, so
//!   cloning a snapshot is O(1) in the size of the program.
//!
//! ## Modules
//!
//! - `core`: rules, the machine snapshot, parse errors
//! - `host`: state log, interactive session, batch runner
//! - `programs`: sample algorithms

pub mod core;
pub mod host;
pub mod programs;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{Markov, ParseError, Rule};

pub use crate::host::{
    Cycle, RunConfig, RunOutcome, RunReport, Runner,
    Session, StateLog, StepEvent,
};

pub use crate::programs::Program;
