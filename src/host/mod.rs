//! Host-side execution: everything around the engine that decides when
//! to step and when to stop.
//!
//! The engine is a pure state machine with no loop protection. This module
//! provides what an interactive or batch host needs on top of it:
//!
//! - [`StateLog`]: visited states, indexed for repeat lookups
//! - [`Session`]: editor-style controls (rules, input, reset, play/pause, step)
//! - [`Runner`]: run to completion under a [`RunConfig`]
//!
//! ## Example Usage
//!
//! ```
//! use markov_engine::core::Markov;
//! use markov_engine::host::{RunConfig, RunOutcome, Runner};
//!
//! let machine = Markov::new()
//!     .parse_source("|0:0||\n1:0|\n0:")
//!     .unwrap()
//!     .set_initial_state("101");
//!
//! let report = Runner::new(RunConfig::default()).run(machine);
//! assert_eq!(report.outcome, RunOutcome::Halted);
//! assert_eq!(report.markov.state(), "|||||");
//! ```

mod log;
mod runner;
mod session;

pub use log::StateLog;
pub use runner::{RunConfig, RunOutcome, RunReport, Runner, MAX_SPEED, MIN_SPEED};
pub use session::{Cycle, Session, StepEvent};
