//! Session and runner bindings for Python.

use pyo3::prelude::*;

use crate::host::{RunConfig, RunOutcome, Runner, Session, StepEvent};

use super::py_core::{syntax_error, PyMarkov};

fn event_name(event: &StepEvent) -> &'static str {
    match event {
        StepEvent::Moved => "moved",
        StepEvent::Terminated => "terminated",
        StepEvent::Halted => "halted",
        StepEvent::Idle => "idle",
        StepEvent::Cycle(_) => "cycle",
    }
}

fn outcome_name(outcome: &RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Terminated => "terminated",
        RunOutcome::Halted => "halted",
        RunOutcome::AlreadyTerminated => "already_terminated",
        RunOutcome::Cycle(_) => "cycle",
        RunOutcome::StepLimit(_) => "step_limit",
    }
}

/// Python wrapper for Session.
///
/// Mutable, unlike `Markov`: it tracks the current snapshot, the log of
/// visited states, and the last error.
#[pyclass(name = "Session")]
pub struct PySession(pub Session);

#[pymethods]
impl PySession {
    #[new]
    #[pyo3(signature = (detect_cycles = true))]
    fn new(detect_cycles: bool) -> Self {
        Self(Session::new().with_cycle_detection(detect_cycles))
    }

    /// Replace the rules. On error the previous rules are kept.
    fn set_rules(&mut self, source: &str) -> PyResult<()> {
        self.0.set_rules(source).map_err(syntax_error)
    }

    fn set_initial_state(&mut self, initial_state: String) {
        self.0.set_initial_state(initial_state);
    }

    fn reset(&mut self) {
        self.0.reset();
    }

    fn play(&mut self) -> bool {
        self.0.play()
    }

    fn pause(&mut self) {
        self.0.pause();
    }

    /// Step once. Returns "moved", "terminated", "halted", "idle" or "cycle".
    fn step(&mut self) -> &'static str {
        event_name(&self.0.step())
    }

    /// Step once if playing. Returns the event name, or None when paused.
    fn tick(&mut self) -> Option<&'static str> {
        self.0.tick().as_ref().map(event_name)
    }

    #[getter]
    fn markov(&self) -> PyMarkov {
        PyMarkov(self.0.markov().clone())
    }

    #[getter]
    fn log(&self) -> Vec<String> {
        self.0.log().iter().map(str::to_string).collect()
    }

    #[getter]
    fn error(&self) -> Option<String> {
        self.0.error().map(str::to_string)
    }

    #[getter]
    fn running(&self) -> bool {
        self.0.is_running()
    }
}

/// Run a program to completion.
///
/// Returns (outcome, final_state, log) where outcome is one of
/// "terminated", "halted", "already_terminated", "cycle", "step_limit".
#[pyfunction]
#[pyo3(signature = (rules, input, max_steps = Some(100_000), detect_cycles = true))]
pub fn run(
    rules: &str,
    input: &str,
    max_steps: Option<usize>,
    detect_cycles: bool,
) -> PyResult<(String, String, Vec<String>)> {
    let markov = crate::core::Markov::new()
        .parse_source(rules)
        .map_err(syntax_error)?
        .set_initial_state(input);

    let config = RunConfig::default()
        .with_max_steps(max_steps)
        .with_cycle_detection(detect_cycles);
    let report = Runner::new(config).run(markov);

    Ok((
        outcome_name(&report.outcome).to_string(),
        report.markov.state().to_string(),
        report.log.iter().map(str::to_string).collect(),
    ))
}
