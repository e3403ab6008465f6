//! Python bindings for the markov-engine interpreter.
//!
//! # Quick Start
//!
//! ```python
//! import markov_engine as me
//!
//! # Snapshots are immutable; every call returns a new Markov
//! m = me.Markov().parse_rules(["|0:0||", "1:0|", "0:"]).set_initial_state("101")
//! moved, m = m.step()
//!
//! # Or run to completion with a step limit and cycle detection
//! outcome, state, log = me.run("|0:0||\n1:0|\n0:", "101")
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_session;

pub use py_core::*;
pub use py_session::*;

/// markov-engine: a Markov algorithm interpreter.
#[pymodule]
fn markov_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Engine types
    m.add_class::<PyRule>()?;
    m.add_class::<PyMarkov>()?;

    // Host types
    m.add_class::<PySession>()?;
    m.add_function(wrap_pyfunction!(run, m)?)?;

    Ok(())
}
