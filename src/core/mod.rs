//! Engine types: rules, the machine snapshot, parse errors.
//!
//! This module is the pure interpreter. It never loops on its own;
//! driving steps, logging visited states and spotting cycles belong to
//! the host (see `crate::host`).

pub mod error;
pub mod rule;
pub mod machine;

pub use error::ParseError;
pub use rule::{Rule, SEPARATOR};
pub use machine::Markov;
